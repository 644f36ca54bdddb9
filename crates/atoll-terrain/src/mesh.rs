//! Terrain mesh data produced by a completed generation pass.

use glam::{Vec2, Vec3, Vec4};

/// Vertex color written for every terrain vertex.
pub const TERRAIN_VERTEX_COLOR: Vec4 = Vec4::ONE;

/// A finished heightmap grid mesh, ready to hand to a renderer.
///
/// Vertices are laid out row-major: vertex `(row, col)` lives at index
/// `row * (resolution + 1) + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    /// Vertex positions in mesh-local space.
    pub positions: Vec<Vec3>,
    /// Texture coordinates, `[0, 1]` across the grid.
    pub uvs: Vec<Vec2>,
    /// Triangle list, 3 indices per triangle.
    pub indices: Vec<u32>,
    /// Per-vertex colors.
    pub colors: Vec<Vec4>,
    /// Smooth per-vertex normals.
    pub normals: Vec<Vec3>,
}

impl TerrainMesh {
    /// Assemble a mesh from a finished vertex grid: triangulate, color, and
    /// derive normals.
    pub fn from_grid(resolution: u32, positions: Vec<Vec3>, uvs: Vec<Vec2>) -> Self {
        let indices = grid_indices(resolution);
        let colors = vec![TERRAIN_VERTEX_COLOR; positions.len()];
        let normals = vertex_normals(&positions, &indices);
        Self {
            positions,
            uvs,
            indices,
            colors,
            normals,
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Triangle indices for a `resolution x resolution` cell grid.
///
/// Each cell emits `{top_left, bottom_left, top_right}` followed by
/// `{top_right, bottom_left, bottom_right}`, where "bottom" is the next row.
pub fn grid_indices(resolution: u32) -> Vec<u32> {
    let res = resolution as usize;
    let row_len = resolution + 1;
    let mut indices = Vec::with_capacity(res * res * 6);

    for row in 0..resolution {
        for col in 0..resolution {
            let top_left = row * row_len + col;
            let top_right = top_left + 1;
            let bottom_left = top_left + row_len;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }

    indices
}

/// Smooth vertex normals by accumulating area-weighted face normals.
///
/// Vertices touched by no triangle, or whose accumulated normal is
/// degenerate, get `+Y`.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let v0 = positions[i0];
        let edge1 = positions[i1] - v0;
        let edge2 = positions[i2] - v0;
        // Unnormalized cross product: its length is twice the triangle area.
        let face_normal = edge1.cross(edge2);

        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_grid(resolution: u32) -> (Vec<Vec3>, Vec<Vec2>) {
        let step = 1.0 / resolution as f32;
        let mut positions = Vec::new();
        let mut uvs = Vec::new();
        for row in 0..=resolution {
            for col in 0..=resolution {
                positions.push(Vec3::new(col as f32 * step - 0.5, 0.0, row as f32 * step - 0.5));
                uvs.push(Vec2::new(col as f32 * step, row as f32 * step));
            }
        }
        (positions, uvs)
    }

    #[test]
    fn test_index_count_and_range() {
        for res in [1_u32, 2, 3, 7, 16] {
            let indices = grid_indices(res);
            let vertex_count = (res + 1) * (res + 1);
            assert_eq!(indices.len(), (res * res * 6) as usize);
            assert!(indices.iter().all(|&i| i < vertex_count));
        }
    }

    #[test]
    fn test_zero_resolution_has_no_triangles() {
        assert!(grid_indices(0).is_empty());
    }

    #[test]
    fn test_cell_winding() {
        let res = 3;
        let indices = grid_indices(res);
        let row_len = res + 1;

        for row in 0..res {
            for col in 0..res {
                let cell = ((row * res + col) * 6) as usize;
                let top_left = row * row_len + col;
                let top_right = top_left + 1;
                let bottom_left = top_left + row_len;
                let bottom_right = bottom_left + 1;

                assert_eq!(
                    &indices[cell..cell + 6],
                    &[top_left, bottom_left, top_right, top_right, bottom_left, bottom_right],
                    "cell ({row}, {col})"
                );
            }
        }
    }

    #[test]
    fn test_flat_grid_normals_point_up() {
        let (positions, uvs) = flat_grid(4);
        let mesh = TerrainMesh::from_grid(4, positions, uvs);
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1e-6, "normal {n:?} should be +Y");
        }
    }

    #[test]
    fn test_sloped_grid_normals_are_unit_length_and_tilted() {
        let (mut positions, uvs) = flat_grid(4);
        for p in &mut positions {
            p.y = p.x;
        }
        let mesh = TerrainMesh::from_grid(4, positions, uvs);
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
            // Surface y = x has normal (-1, 1, 0) / sqrt(2).
            assert!(n.x < 0.0 && n.y > 0.0, "unexpected normal {n:?}");
            assert!(n.z.abs() < 1e-5);
        }
    }

    #[test]
    fn test_colors_are_uniform_white() {
        let (positions, uvs) = flat_grid(2);
        let mesh = TerrainMesh::from_grid(2, positions, uvs);
        assert_eq!(mesh.colors.len(), 9);
        assert!(mesh.colors.iter().all(|&c| c == TERRAIN_VERTEX_COLOR));
    }

    #[test]
    fn test_single_vertex_mesh() {
        let mesh = TerrainMesh::from_grid(0, vec![Vec3::new(-0.5, 0.2, -0.5)], vec![Vec2::ZERO]);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.normals, vec![Vec3::Y]);
    }
}
