//! One-sided infinite plane.
//!
//! A plane only reports hits on the side its normal points to. The
//! orientation is settled once when the scene is built (see
//! [`Plane::facing`]) and never changes while tracing.

use prism_math::{Ray, Vec3, VectorExt, EPSILON};

use crate::hittable::{Hittable, SurfaceHit};
use crate::SceneResult;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a new plane. Fails if `normal` has zero length.
    pub fn new(point: Vec3, normal: Vec3) -> SceneResult<Self> {
        Ok(Self {
            point,
            normal: normal.unit()?,
        })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Same plane, turned so its front face looks towards `reference`.
    ///
    /// Returns the plane and whether the normal was flipped. A reference
    /// lying on the plane keeps the authored orientation.
    pub fn facing(self, reference: Vec3) -> (Self, bool) {
        if (reference - self.point).dot(self.normal) < 0.0 {
            (
                Self {
                    point: self.point,
                    normal: -self.normal,
                },
                true,
            )
        } else {
            (self, false)
        }
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let cs = self.normal.dot(ray.direction());
        // Parallel, or approaching the back face
        if cs.abs() < EPSILON || cs > 0.0 {
            return None;
        }

        let distance = (self.point - ray.origin()).dot(self.normal) / cs;
        if distance <= 0.0 {
            return None;
        }

        Some(SurfaceHit {
            distance,
            point: ray.at(distance),
            normal: self.normal,
        })
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneError;

    #[test]
    fn test_plane_hit_front_face() {
        let plane = Plane::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = plane.intersect(&ray).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-9);
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_plane_back_face_is_a_miss() {
        let plane = Plane::new(Vec3::new(10.0, 0.0, 0.0), Vec3::X).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_parallel_is_a_miss() {
        let plane = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_origin_is_a_miss() {
        let plane = Plane::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::X).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        assert!(plane.intersect(&ray).is_some());

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_facing_flips_towards_reference() {
        let plane = Plane::new(Vec3::new(10.0, 0.0, 0.0), Vec3::X).unwrap();

        let (oriented, flipped) = plane.facing(Vec3::ZERO);
        assert!(flipped);
        assert_eq!(oriented.normal(), Vec3::new(-1.0, 0.0, 0.0));

        // Already facing: unchanged
        let (again, flipped) = oriented.facing(Vec3::ZERO);
        assert!(!flipped);
        assert_eq!(again, oriented);

        // After orientation the plane is hit from the reference side
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(oriented.intersect(&ray).is_some());
    }

    #[test]
    fn test_plane_facing_reference_on_plane() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Z).unwrap();
        let (same, flipped) = plane.facing(Vec3::new(3.0, 4.0, 0.0));
        assert!(!flipped);
        assert_eq!(same, plane);
    }

    #[test]
    fn test_plane_degenerate_normal() {
        assert!(matches!(
            Plane::new(Vec3::ZERO, Vec3::ZERO),
            Err(SceneError::Degenerate(_))
        ));
    }
}
