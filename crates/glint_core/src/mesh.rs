//! Triangle mesh geometry and the OBJ reader.
//!
//! Only vertex positions and polygon faces are read. Texture and normal
//! indices (`f 1/2/3 ...`) are ignored, as are vertex colors and every other
//! record type. Polygons with more than three corners are fan-triangulated.

use std::fs;
use std::path::Path;

use glint_math::{Aabb, Vec3};
use thiserror::Error;

/// Errors that can occur while reading a mesh file.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Face on line {line} uses vertex index 0 (indices are 1-based)")]
    ZeroIndex { line: usize },

    #[error("Face on line {line} references vertex {index}, but only {count} vertices are defined")]
    IndexOutOfRange { line: usize, index: i64, count: usize },

    #[error("Invalid number format on line {line}: {token}")]
    InvalidNumber { line: usize, token: String },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// A mesh consisting of vertex positions and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from positions and triangle indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = Self::compute_bounds(&positions);
        Self {
            positions,
            indices,
            bounds,
        }
    }

    fn compute_bounds(positions: &[Vec3]) -> Aabb {
        let mut bounds = Aabb::INVALID;
        for pos in positions {
            bounds.expand_to_point(*pos);
        }
        bounds
    }

    /// Read an OBJ file.
    pub fn load_obj(path: impl AsRef<Path>) -> MeshResult<Mesh> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let mesh = Self::parse_obj(&source)?;

        log::debug!(
            "Read {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse OBJ text.
    pub fn parse_obj(source: &str) -> MeshResult<Mesh> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();

        for (i, raw) in source.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.split('#').next().unwrap_or("");
            let mut tokens = line.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let mut coords = [0.0f32; 3];
                    for c in &mut coords {
                        let token = tokens.next().unwrap_or("");
                        *c = token.parse().map_err(|_| MeshError::InvalidNumber {
                            line: line_no,
                            token: token.to_string(),
                        })?;
                    }
                    positions.push(Vec3::from_array(coords));
                }
                Some("f") => {
                    let mut face = Vec::new();
                    for token in tokens {
                        // drop "/vt/vn" suffixes
                        let index = token.split('/').next().unwrap_or("");
                        face.push(resolve_index(index, positions.len(), line_no)?);
                    }

                    if face.len() < 3 {
                        log::warn!("Skipping face with {} vertices on line {}", face.len(), line_no);
                        continue;
                    }
                    for k in 1..face.len() - 1 {
                        indices.extend_from_slice(&[face[0], face[k], face[k + 1]]);
                    }
                }
                _ => {}
            }
        }

        Ok(Mesh::new(positions, indices))
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate triangles as `[v0, v1, v2]` corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }
}

/// Turn a 1-based (or negative, relative) OBJ index into a 0-based one.
fn resolve_index(token: &str, count: usize, line: usize) -> MeshResult<u32> {
    let index: i64 = token.parse().map_err(|_| MeshError::InvalidNumber {
        line,
        token: token.to_string(),
    })?;

    let resolved = match index {
        0 => return Err(MeshError::ZeroIndex { line }),
        i if i < 0 => count as i64 + i,
        i => i - 1,
    };

    if resolved < 0 || resolved >= count as i64 {
        return Err(MeshError::IndexOutOfRange { line, index, count });
    }
    Ok(resolved as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# a unit quad
v 0 0 0
v 1 0 0
v 1 1 0 0.5 0.5 0.5
v 0 1 0

f 1 2 3 4
";

    #[test]
    fn test_mesh_creation() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mesh = Mesh::new(positions, vec![0, 1, 2]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_bounds_computation() {
        let positions = vec![
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let mesh = Mesh::new(positions, vec![0, 1, 2]);

        assert_eq!(mesh.bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(mesh.bounds.max, Vec3::new(4.0, 5.0, 6.0));

        let empty = Mesh::new(Vec::new(), Vec::new());
        assert!(!empty.bounds.is_valid());
    }

    #[test]
    fn test_parse_quad_fan() {
        let mesh = Mesh::parse_obj(QUAD).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2, "quad should split into 2 triangles");
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);

        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles[1], [Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::Y]);
    }

    #[test]
    fn test_texture_and_normal_indices_ignored() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/2/1 3//1\n";
        let mesh = Mesh::parse_obj(src).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nv 5 5 5\nf -1 1 2\n";
        let mesh = Mesh::parse_obj(src).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_zero_index_is_error() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(matches!(
            Mesh::parse_obj(src),
            Err(MeshError::ZeroIndex { line: 4 })
        ));
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let src = "v 0 0 0\nf 1 2 3\n";
        assert!(matches!(
            Mesh::parse_obj(src),
            Err(MeshError::IndexOutOfRange { line: 2, index: 2, count: 1 })
        ));

        let src = "v 0 0 0\nf -2 1 1\n";
        assert!(Mesh::parse_obj(src).is_err());
    }

    #[test]
    fn test_bad_vertex_is_error() {
        let err = Mesh::parse_obj("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, MeshError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn test_degenerate_face_skipped() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        let mesh = Mesh::parse_obj(src).unwrap();
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_missing_file() {
        let result = Mesh::load_obj("/definitely/not/here.obj");
        assert!(matches!(result, Err(MeshError::Io(_))));
    }
}
