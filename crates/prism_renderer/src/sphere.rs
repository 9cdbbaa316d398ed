//! Sphere primitive for ray tracing.

use prism_math::{Ray, Vec3, VectorExt};

use crate::hittable::{Hittable, SurfaceHit};
use crate::{SceneError, SceneResult};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f64) -> SceneResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let oc = ray.origin() - self.center;
        let b = -ray.direction().dot(oc);
        let discriminant = self.radius * self.radius - (oc.dot(oc) - b * b);
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let d1 = b - sqrtd;
        let d2 = b + sqrtd;

        // Closest positive root. Equal roots (a tangent ray) count as a miss.
        let distance = if d1 > 0.0 && (d2 > d1 || d2 < 0.0) {
            d1
        } else if d2 > 0.0 && (d1 > d2 || d1 < 0.0) {
            d2
        } else {
            return None;
        };

        let point = ray.at(distance);
        Some(SurfaceHit {
            distance,
            point,
            normal: self.normal_at(point),
        })
    }

    /// Outward normal, also when the ray starts inside the sphere.
    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).unit_or_zero()
    }
}
