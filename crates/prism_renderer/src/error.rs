//! Scene construction errors.
//!
//! Everything that can go wrong is caught while the scene and its render
//! settings are built.
//! Tracing itself is total: a ray that finds nothing yields the
//! background color.

use std::path::PathBuf;

use prism_core::{MaterialError, MeshError};
use prism_math::MathError;
use thiserror::Error;

/// Errors that can occur while building a scene or its render settings.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Degenerate geometry: {0}")]
    Degenerate(#[from] MathError),

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("Invalid material on primitive {index}: {source}")]
    InvalidMaterial {
        index: usize,
        #[source]
        source: MaterialError,
    },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid light {index}: {message}")]
    InvalidLight { index: usize, message: String },

    #[error("Failed to load model {path}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshError,
    },

    #[error("Scene has no camera")]
    MissingCamera,

    #[error("Invalid render settings: {0}")]
    InvalidConfig(String),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;
