//! Headless [`TerrainRenderer`] that keeps what it was given.

use atoll_terrain::{TerrainMesh, TerrainRenderer};
use tracing::debug;

/// Stores the latest mesh and material range instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    mesh: Option<TerrainMesh>,
    height_range: Option<(f32, f32)>,
    meshes_received: u64,
}

impl RecordingRenderer {
    /// An empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mesh currently "on screen".
    pub fn mesh(&self) -> Option<&TerrainMesh> {
        self.mesh.as_ref()
    }

    /// `(height_min, height_max)` last pushed to the material.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.height_range
    }

    /// Number of meshes handed over so far.
    pub fn meshes_received(&self) -> u64 {
        self.meshes_received
    }
}

impl TerrainRenderer for RecordingRenderer {
    fn set_height_range(&mut self, height_min: f32, height_max: f32) {
        debug!(height_min, height_max, "material height range updated");
        self.height_range = Some((height_min, height_max));
    }

    fn replace_mesh(&mut self, mesh: TerrainMesh) {
        self.meshes_received += 1;
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "terrain mesh replaced"
        );
        self.mesh = Some(mesh);
    }
}
