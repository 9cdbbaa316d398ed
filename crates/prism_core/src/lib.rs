//! Prism Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Materials**: `Material` and procedural `Pattern`s with validation
//! - **Meshes**: the line-oriented `p`/`l` mesh format and fan triangulation
//! - **Scene files**: a JSON `SceneDescription` with cameras, objects and lights
//!
//! # Example
//!
//! ```ignore
//! use prism_core::scene::load_scene;
//!
//! let description = load_scene("scenes/room.json")?;
//! println!("Loaded {} objects, {} lights",
//!     description.objects.len(),
//!     description.lights.len());
//! ```

pub mod material;
pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use material::{Material, MaterialError, Pattern};
pub use mesh::{load_mesh, parse_mesh, Mesh, MeshError, MeshResult, MeshTransform};
pub use scene::{
    load_scene, parse_scene, CameraDescription, LightDescription, LoadError, LoadResult,
    ObjectDescription, RenderSettings, SceneDescription,
};
