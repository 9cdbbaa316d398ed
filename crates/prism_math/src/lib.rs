//! Prism math - vector algebra, rays and intervals for the tracer.
//!
//! Everything is double precision. `Vec3` is used interchangeably for
//! points, directions and colors; `Color` is the same type under a
//! name that reads better at shading sites.
//!
//! Color blending follows the operand types: `Vec3 * Vec3` multiplies
//! component-wise (color x color), `Vec3 * f64` scales (color x scalar).

// Re-export the glam types we build on
pub use glam::{dvec3, DQuat, DVec3, EulerRot};

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{MathError, MathResult, VectorExt};

/// Three-component double precision vector.
pub type Vec3 = DVec3;

/// RGB color, conventionally in [0, 1] per channel before quantization.
pub type Color = DVec3;

/// Geometric tolerance for parallel tests, on-plane tests and area comparisons.
pub const EPSILON: f64 = 1e-4;
