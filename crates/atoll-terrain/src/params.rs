//! Generation parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::curve::ResponseCurve;
use crate::error::TerrainError;

/// Everything one generation pass needs. A snapshot is taken when a pass
/// starts, so later edits never affect a pass already in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Horizontal footprint scaling. Larger values stretch noise features.
    pub scale: f32,
    /// Vertical amplitude scaling.
    pub height: f32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
    /// Number of noise octaves to sum.
    pub octaves: u32,
    /// Grid subdivisions per axis. The mesh has `(vertex_resolution + 1)^2` vertices.
    pub vertex_resolution: u32,
    /// Vertex rows processed per time slice before yielding to the host.
    pub rows_per_slice: u32,
    /// Perlin permutation seed.
    pub seed: u32,
    /// Remaps each octave's raw noise value before amplitude weighting.
    pub height_curve: ResponseCurve,
    /// Remaps normalized distance from the grid center to a height multiplier.
    pub island_curve: ResponseCurve,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            scale: 1.0,
            height: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
            octaves: 2,
            vertex_resolution: 10,
            rows_per_slice: 1,
            seed: 0,
            height_curve: ResponseCurve::identity(),
            island_curve: ResponseCurve::identity(),
        }
    }
}

/// Largest accepted `vertex_resolution`: `(65535 + 1)^2 - 1 == u32::MAX`.
pub const MAX_VERTEX_RESOLUTION: u32 = u16::MAX as u32;

impl GenerationParameters {
    /// Check every field against its contract.
    ///
    /// A zero `vertex_resolution` is accepted: it produces a single-vertex mesh.
    /// Resolutions above [`MAX_VERTEX_RESOLUTION`] are rejected because their
    /// vertex indices would not fit in `u32`.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.rows_per_slice == 0 {
            return Err(TerrainError::ZeroRowsPerSlice);
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid("scale", self.scale, "must be finite and positive"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(invalid("height", self.height, "must be finite and positive"));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity >= 1.0) {
            return Err(invalid(
                "lacunarity",
                self.lacunarity,
                "must be finite and at least 1",
            ));
        }
        if !(self.persistence.is_finite() && self.persistence > 0.0) {
            return Err(invalid(
                "persistence",
                self.persistence,
                "must be finite and positive",
            ));
        }
        if self.octaves == 0 {
            return Err(invalid("octaves", 0.0, "must be at least 1"));
        }
        if self.vertex_resolution > MAX_VERTEX_RESOLUTION {
            return Err(invalid(
                "vertex_resolution",
                self.vertex_resolution,
                "(resolution + 1)^2 vertices must be addressable by u32 indices",
            ));
        }
        Ok(())
    }

    /// Number of vertices along one grid edge.
    pub fn row_len(&self) -> usize {
        self.vertex_resolution as usize + 1
    }

    /// Total vertex count of the finished mesh.
    pub fn vertex_count(&self) -> usize {
        self.row_len() * self.row_len()
    }

    /// Total triangle index count of the finished mesh.
    pub fn index_count(&self) -> usize {
        let res = self.vertex_resolution as usize;
        res * res * 6
    }

    /// Spacing between adjacent vertices in mesh units (the mesh spans `[-0.5, 0.5]`).
    ///
    /// Zero for the degenerate single-vertex grid.
    pub fn square_size(&self) -> f32 {
        if self.vertex_resolution == 0 {
            0.0
        } else {
            1.0 / self.vertex_resolution as f32
        }
    }
}

fn invalid(name: &'static str, value: impl Into<f64>, reason: &'static str) -> TerrainError {
    TerrainError::InvalidParameter {
        name,
        value: value.into(),
        reason,
    }
}
