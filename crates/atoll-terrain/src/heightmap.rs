//! Multi-octave Perlin height sampler.
//!
//! Sums several octaves of 2D Perlin noise over the terrain grid, passing each
//! octave's raw value through the height curve before weighting it by the
//! octave amplitude.

use noise::{NoiseFn, Perlin};

use crate::curve::ResponseCurve;
use crate::params::GenerationParameters;

/// Offset added to every noise coordinate.
///
/// Keeps the sampled window far from the noise origin, where Perlin noise is
/// symmetric and lattice-aligned.
pub const NOISE_DOMAIN_BIAS: f64 = 100_000.0;

/// Computes the shaped noise height of a single grid vertex.
///
/// The sampler is a pure function of `(row, col)` for the parameters it was
/// built from: repeated calls return bit-identical values.
///
/// Each octave contributes `height_curve(noise) * amplitude`: the curve sees
/// the raw `[0, 1]` noise and the amplitude scales its output. Curving
/// `noise * amplitude` instead gives the same result only for linear curves
/// through the origin; a non-linear curve here shapes every octave alike.
#[derive(Clone, Debug)]
pub struct NoiseHeightSampler {
    noise: Perlin,
    scale: f64,
    lacunarity: f64,
    persistence: f32,
    octaves: u32,
    square_size: f64,
    half_resolution: i64,
    height_curve: ResponseCurve,
}

impl NoiseHeightSampler {
    /// Create a sampler for one generation pass.
    pub fn new(params: &GenerationParameters) -> Self {
        Self {
            noise: Perlin::new(params.seed),
            scale: params.scale as f64,
            lacunarity: params.lacunarity as f64,
            persistence: params.persistence,
            octaves: params.octaves,
            square_size: params.square_size() as f64,
            half_resolution: (params.vertex_resolution / 2) as i64,
            height_curve: params.height_curve.clone(),
        }
    }

    /// Sample the shaped height at grid vertex `(row, col)`.
    ///
    /// Grid coordinates are centered on `resolution / 2` (truncating), scaled
    /// by the vertex spacing and `frequency / scale` for each octave.
    pub fn sample(&self, row: u32, col: u32) -> f32 {
        let x = (col as i64 - self.half_resolution) as f64 * self.square_size;
        let z = (row as i64 - self.half_resolution) as f64 * self.square_size;

        let mut total = 0.0_f32;
        let mut frequency = 1.0_f64;
        let mut amplitude = 1.0_f32;

        for _ in 0..self.octaves {
            let nx = NOISE_DOMAIN_BIAS + x * frequency / self.scale;
            let nz = NOISE_DOMAIN_BIAS + z * frequency / self.scale;
            let raw = self.unit_noise(nx, nz);
            total += self.height_curve.evaluate(raw) * amplitude;

            frequency *= self.lacunarity;
            amplitude *= self.persistence;
        }

        total
    }

    /// Raw Perlin noise remapped from `[-1, 1]` to `[0, 1]`.
    fn unit_noise(&self, x: f64, z: f64) -> f32 {
        let n = self.noise.get([x, z]);
        (n * 0.5 + 0.5).clamp(0.0, 1.0) as f32
    }

    /// Sum of all octave amplitudes.
    ///
    /// With a height curve bounded by `[0, 1]`, every sample lies in
    /// `[0, max_amplitude()]`.
    pub fn max_amplitude(&self) -> f32 {
        let mut sum = 0.0;
        let mut amp = 1.0_f32;
        for _ in 0..self.octaves {
            sum += amp;
            amp *= self.persistence;
        }
        sum
    }
}
