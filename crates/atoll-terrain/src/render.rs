//! The contract between terrain generation and whatever displays it.

use crate::mesh::TerrainMesh;

/// Receives generated geometry and the color-by-height material parameters.
///
/// Both calls hand over immutable snapshots; generation never touches them
/// again after emission.
pub trait TerrainRenderer {
    /// Set the altitude range the terrain material remaps its color gradient over.
    fn set_height_range(&mut self, height_min: f32, height_max: f32);

    /// Replace the currently displayed terrain geometry.
    fn replace_mesh(&mut self, mesh: TerrainMesh);
}
