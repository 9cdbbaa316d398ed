//! JSON scene description.
//!
//! The description is plain data: it is validated and turned into
//! intersectable primitives by the renderer. Vectors are written as
//! `[x, y, z]` arrays.
//!
//! ```json
//! {
//!   "camera": { "origin": [0, 0, 0], "direction": [1, 0, 0],
//!               "distance": 50, "width": 50, "height": 50,
//!               "resolution": [400, 400] },
//!   "objects": [
//!     { "type": "sphere", "center": [150, 0, 0], "radius": 20,
//!       "material": { "color": [1, 0, 0], "reflective": 0.3 } }
//!   ],
//!   "lights": [
//!     { "type": "point", "origin": [80, 0, 60], "color": [1, 1, 1] }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use prism_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Material;
use crate::mesh::MeshTransform;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Distance falloff coefficient used when a point light does not set one.
pub const DEFAULT_DISTANCE_COEF: f64 = 200_000.0;

/// Pinhole camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub origin: Vec3,
    /// View direction (normalized on build)
    pub direction: Vec3,
    /// Distance from the origin to the viewport
    pub distance: f64,
    /// Viewport width in world units
    pub width: f64,
    /// Viewport height in world units
    pub height: f64,
    /// Output resolution in pixels (x, y)
    pub resolution: [u32; 2],
}

/// One scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Sphere {
        center: Vec3,
        radius: f64,
        #[serde(default)]
        material: Material,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
        #[serde(default)]
        material: Material,
    },
    Triangle {
        vertices: [Vec3; 3],
        #[serde(default)]
        material: Material,
    },
    /// A mesh file, fan-triangulated into triangles sharing one material.
    Model {
        /// Relative paths are resolved against the scene file's directory
        path: PathBuf,
        #[serde(flatten)]
        transform: MeshTransform,
        #[serde(default)]
        material: Material,
    },
}

/// One light source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescription {
    Point {
        origin: Vec3,
        color: Color,
        #[serde(default = "default_distance_coef")]
        distance_coef: f64,
    },
    Distant {
        direction: Vec3,
        color: Color,
    },
}

fn default_distance_coef() -> f64 {
    DEFAULT_DISTANCE_COEF
}

/// Optional overrides for the render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub max_depth: Option<u32>,
    pub background: Option<Color>,
    pub ambient: Option<f64>,
    pub bias: Option<f64>,
}

/// A complete scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    #[serde(default)]
    pub render: RenderSettings,
}

impl SceneDescription {
    /// Rewrite relative model paths so they are relative to `base_dir`.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for object in &mut self.objects {
            if let ObjectDescription::Model { path, .. } = object {
                if path.is_relative() {
                    let resolved = base_dir.join(&*path);
                    *path = resolved;
                }
            }
        }
    }
}

/// Parse a scene description from a JSON string.
///
/// Model paths are left as written.
pub fn parse_scene(source: &str) -> LoadResult<SceneDescription> {
    Ok(serde_json::from_str(source)?)
}

/// Load a scene description from a JSON file.
///
/// Relative model paths are resolved against the file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let mut description = parse_scene(&source)?;

    if let Some(dir) = path.parent() {
        description.resolve_paths(dir);
    }

    log::info!(
        "Loaded scene {}: {} objects, {} lights",
        path.display(),
        description.objects.len(),
        description.lights.len()
    );
    Ok(description)
}
