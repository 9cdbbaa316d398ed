//! Polygon meshes in the line-oriented `p`/`l` format.
//!
//! ```text
//! # comment
//! p 0 0 0        vertex 0
//! p 1 0 0        vertex 1
//! p 0 1 0        vertex 2
//! l 0 1 2        polygon over 0-based vertex indices
//! ```
//!
//! Polygons are fan-triangulated into `[Vec3; 3]` triplets after the
//! model transform has been applied.

use std::path::Path;

use prism_math::{DQuat, EulerRot, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading a mesh file.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Vertex index {index} at line {line} is out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("Polygon at line {line} has {count} indices, at least 3 are required")]
    TooFewIndices { line: usize, count: usize },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Placement of a mesh in the scene.
///
/// Order: Scale -> Rotate -> Translate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshTransform {
    pub translation: Vec3,
    /// Uniform scale factor
    pub scale: f64,
    /// XYZ Euler angles in radians
    pub rotation: Vec3,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
            rotation: Vec3::ZERO,
        }
    }
}

impl MeshTransform {
    /// Apply the transform to a point.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        let rotation = DQuat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        rotation * (point * self.scale) + self.translation
    }
}

/// Vertex positions plus polygons indexing into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,

    /// Polygons as lists of 0-based vertex indices (3 or more each)
    pub polygons: Vec<Vec<usize>>,
}

impl Mesh {
    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles the polygons fan out into.
    pub fn triangle_count(&self) -> usize {
        self.polygons.iter().map(|p| p.len().saturating_sub(2)).sum()
    }

    /// Fan-triangulate every polygon as `(v0, vi, vi+1)` in world space.
    ///
    /// Polygons referring to a vertex that does not exist are skipped.
    pub fn triangulate(&self, transform: &MeshTransform) -> Vec<[Vec3; 3]> {
        let world: Vec<Vec3> = self.positions.iter().map(|p| transform.apply(*p)).collect();
        let mut triangles = Vec::with_capacity(self.triangle_count());

        for (index, polygon) in self.polygons.iter().enumerate() {
            let Some(points) = polygon
                .iter()
                .map(|&v| world.get(v).copied())
                .collect::<Option<Vec<_>>>()
            else {
                log::warn!(
                    "Skipping polygon {}: vertex index out of range (mesh has {} vertices)",
                    index,
                    world.len()
                );
                continue;
            };
            let Some((&p0, rest)) = points.split_first() else {
                continue;
            };
            for pair in rest.windows(2) {
                triangles.push([p0, pair[0], pair[1]]);
            }
        }

        triangles
    }
}

/// Parse a mesh from file contents.
pub fn parse_mesh(source: &str) -> MeshResult<Mesh> {
    let mut mesh = Mesh::default();

    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let mut tokens = raw.split_whitespace();

        let Some(tag) = tokens.next() else {
            continue;
        };
        if tag.starts_with('#') {
            continue;
        }

        match tag {
            "p" => {
                let coords = tokens
                    .map(|t| parse_number::<f64>(t, line))
                    .collect::<MeshResult<Vec<_>>>()?;
                if coords.len() != 3 {
                    return Err(MeshError::Parse {
                        line,
                        message: format!("expected 3 coordinates, found {}", coords.len()),
                    });
                }
                mesh.positions.push(Vec3::new(coords[0], coords[1], coords[2]));
            }
            "l" => {
                let indices = tokens
                    .map(|t| parse_number::<usize>(t, line))
                    .collect::<MeshResult<Vec<_>>>()?;
                if indices.len() < 3 {
                    return Err(MeshError::TooFewIndices {
                        line,
                        count: indices.len(),
                    });
                }
                // Polygons may only reference vertices declared above them
                let vertex_count = mesh.positions.len();
                if let Some(&index) = indices.iter().find(|&&idx| idx >= vertex_count) {
                    return Err(MeshError::IndexOutOfRange {
                        line,
                        index,
                        vertex_count,
                    });
                }
                mesh.polygons.push(indices);
            }
            other => {
                log::warn!("Skipping unknown mesh record '{}' at line {}", other, line);
            }
        }
    }

    log::debug!(
        "Parsed mesh: {} vertices, {} polygons",
        mesh.positions.len(),
        mesh.polygons.len()
    );
    Ok(mesh)
}

/// Read and parse a mesh file from disk.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let source = std::fs::read_to_string(path.as_ref())?;
    parse_mesh(&source)
}

fn parse_number<T: std::str::FromStr>(token: &str, line: usize) -> MeshResult<T> {
    token.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("invalid number '{}'", token),
    })
}
