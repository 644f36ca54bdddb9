//! Radial island falloff.

use crate::curve::ResponseCurve;
use crate::params::GenerationParameters;

/// Maps a vertex's distance from the grid center to a height multiplier.
#[derive(Clone, Debug)]
pub struct RadialShaper {
    half_resolution: u32,
    island_curve: ResponseCurve,
}

impl RadialShaper {
    /// Create a shaper for one generation pass.
    pub fn new(params: &GenerationParameters) -> Self {
        Self::with_curve(params.vertex_resolution, params.island_curve.clone())
    }

    /// Create a shaper for an explicit resolution and curve.
    pub fn with_curve(resolution: u32, island_curve: ResponseCurve) -> Self {
        Self {
            half_resolution: resolution / 2,
            island_curve,
        }
    }

    /// Distance from `(row, col)` to the center vertex, in units of half the
    /// grid width. The center index uses truncating division.
    ///
    /// Grids with fewer than two subdivisions have a zero half-width: the
    /// center maps to `0` and every other vertex to `+inf`.
    pub fn normalized_distance(&self, row: u32, col: u32) -> f32 {
        let half = self.half_resolution as f32;
        let dx = col as f32 - half;
        let dz = row as f32 - half;
        let distance = (dx * dx + dz * dz).sqrt();

        if self.half_resolution == 0 {
            if distance == 0.0 { 0.0 } else { f32::INFINITY }
        } else {
            distance / half
        }
    }

    /// Island curve evaluated at the normalized distance of `(row, col)`.
    pub fn shape(&self, row: u32, col: u32) -> f32 {
        self.island_curve.evaluate(self.normalized_distance(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_center_is_zero_distance() {
        let shaper = RadialShaper::with_curve(10, ResponseCurve::identity());
        assert_eq!(shaper.normalized_distance(5, 5), 0.0);
        assert_eq!(shaper.shape(5, 5), 0.0);
    }

    #[test]
    fn test_edge_midpoint_is_unit_distance() {
        let shaper = RadialShaper::with_curve(10, ResponseCurve::identity());
        assert!((shaper.normalized_distance(5, 0) - 1.0).abs() < EPSILON);
        assert!((shaper.normalized_distance(10, 5) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_corners_clamp_through_identity_curve() {
        let shaper = RadialShaper::with_curve(10, ResponseCurve::identity());
        assert!((shaper.normalized_distance(0, 0) - 2.0_f32.sqrt()).abs() < EPSILON);
        assert_eq!(shaper.shape(0, 0), 1.0);
    }

    #[test]
    fn test_odd_resolution_uses_truncated_center() {
        // 7 / 2 == 3, so the center is vertex (3, 3) rather than 3.5.
        let shaper = RadialShaper::with_curve(7, ResponseCurve::identity());
        assert_eq!(shaper.normalized_distance(3, 3), 0.0);
        assert!((shaper.normalized_distance(3, 6) - 1.0).abs() < EPSILON);
        assert!((shaper.normalized_distance(3, 7) - 4.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_symmetric_about_center() {
        let shaper = RadialShaper::with_curve(8, ResponseCurve::linear(0.0, 1.0, 1.0, 0.0));
        assert_eq!(shaper.shape(1, 2).to_bits(), shaper.shape(7, 6).to_bits());
        assert_eq!(shaper.shape(2, 1).to_bits(), shaper.shape(1, 2).to_bits());
    }

    #[test]
    fn test_degenerate_grids_do_not_divide_by_zero() {
        let zero = RadialShaper::with_curve(0, ResponseCurve::identity());
        assert_eq!(zero.normalized_distance(0, 0), 0.0);
        assert_eq!(zero.shape(0, 0), 0.0);

        let one = RadialShaper::with_curve(1, ResponseCurve::linear(0.0, 1.0, 1.0, 0.25));
        assert_eq!(one.normalized_distance(0, 0), 0.0);
        assert_eq!(one.normalized_distance(1, 1), f32::INFINITY);
        assert_eq!(one.shape(0, 0), 1.0);
        assert_eq!(one.shape(1, 0), 0.25);
    }

    #[test]
    fn test_shape_is_deterministic() {
        let shaper = RadialShaper::new(&GenerationParameters::default());
        for row in 0..=10 {
            for col in 0..=10 {
                assert_eq!(
                    shaper.shape(row, col).to_bits(),
                    shaper.shape(row, col).to_bits()
                );
            }
        }
    }
}
