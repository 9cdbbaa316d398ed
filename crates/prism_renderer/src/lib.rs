//! Prism Renderer - Whitted-style CPU ray tracing
//!
//! Each pixel gets one primary ray. At every hit the tracer sums the
//! direct light from point and distant lights (with hard shadows), then
//! recurses into at most one mirror ray and one refracted ray until the
//! depth budget runs out.
//!
//! Scenes are assembled with [`SceneBuilder`] (or loaded from a
//! [`prism_core::SceneDescription`]) and are immutable afterwards, so
//! [`render_parallel`] can share them across the rayon pool.

mod bucket;
mod camera;
mod error;
mod hittable;
mod light;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod tracer;
mod triangle;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraBuilder};
pub use error::{SceneError, SceneResult};
pub use hittable::{nearest_hit, Hittable, Intersection, Primitive, PrimitiveId, Shape, SurfaceHit};
pub use light::{DistantLight, Light, PointLight};
pub use plane::Plane;
pub use renderer::{color_to_rgb, render, render_pixel, ImageBuffer, RenderConfig, Rgb};
pub use scene::{Scene, SceneBuilder};
pub use sphere::Sphere;
pub use tracer::trace;
pub use triangle::Triangle;

/// Re-export the math types used throughout the public API
pub use prism_math::{Color, Interval, Ray, Vec3};
