//! Triangle primitive for ray tracing.
//!
//! The ray is first intersected with the triangle's supporting plane
//! (from whichever side it arrives), then the hit point is tested for
//! containment by comparing the triangle's area with the summed areas of
//! the three sub-triangles the point forms with its edges.

use prism_math::{Ray, Vec3, VectorExt, EPSILON};

use crate::hittable::{Hittable, SurfaceHit};
use crate::SceneResult;

/// A two-sided triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    /// Pre-computed area
    area: f64,
}

impl Triangle {
    /// Create a new triangle. Fails for collinear or coincident vertices.
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> SceneResult<Self> {
        let cross = (p2 - p1).cross(p3 - p1);
        let normal = cross.unit()?;

        Ok(Self {
            p1,
            p2,
            p3,
            normal,
            area: cross.length() / 2.0,
        })
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn centroid(&self) -> Vec3 {
        (self.p1 + self.p2 + self.p3) / 3.0
    }

    /// True if `point` lies on the triangle, within `EPSILON`.
    pub fn contains(&self, point: Vec3) -> bool {
        if (point - self.p1).dot(self.normal).abs() > EPSILON {
            return false;
        }

        let a = self.p1 - point;
        let b = self.p2 - point;
        let c = self.p3 - point;
        let sum = (a.cross(b).length() + b.cross(c).length() + c.cross(a).length()) / 2.0;

        (self.area - sum).abs() <= EPSILON
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let cs = self.normal.dot(ray.direction());
        if cs.abs() < EPSILON {
            return None;
        }

        // Use whichever side of the plane faces the ray
        let (normal, cs) = if cs > 0.0 {
            (-self.normal, -cs)
        } else {
            (self.normal, cs)
        };

        let distance = (self.p1 - ray.origin()).dot(normal) / cs;
        if distance <= 0.0 {
            return None;
        }

        let point = ray.at(distance);
        if !self.contains(point) {
            return None;
        }

        Some(SurfaceHit {
            distance,
            point,
            normal,
        })
    }

    /// Face normal as authored (counter-clockwise winding).
    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneError;

    fn triangle() -> Triangle {
        // Triangle in the YZ plane at x = 10
        Triangle::new(
            Vec3::new(10.0, -5.0, -5.0),
            Vec3::new(10.0, 5.0, -5.0),
            Vec3::new(10.0, 0.0, 5.0),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_area_and_normal() {
        let tri = triangle();
        assert!((tri.area() - 50.0).abs() < 1e-9);
        assert!((tri.normal_at(Vec3::ZERO).length() - 1.0).abs() < 1e-12);
        assert!(tri.normal_at(Vec3::ZERO).x.abs() > 0.999);
    }

    #[test]
    fn test_centroid_is_inside() {
        let tri = triangle();
        assert!(tri.contains(tri.centroid()));

        let skewed = Triangle::new(
            Vec3::new(-3.0, 7.0, 1.0),
            Vec3::new(40.0, -2.0, 13.0),
            Vec3::new(5.0, 25.0, -30.0),
        )
        .unwrap();
        assert!(skewed.contains(skewed.centroid()));
    }

    #[test]
    fn test_off_plane_point_is_outside() {
        let tri = triangle();
        let off = tri.centroid() + Vec3::new(1.0, 0.0, 0.0);
        assert!(!tri.contains(off));
    }

    #[test]
    fn test_in_plane_point_outside_edges() {
        let tri = triangle();
        assert!(!tri.contains(Vec3::new(10.0, 20.0, 0.0)));
    }

    #[test]
    fn test_triangle_hit_from_both_sides() {
        let tri = triangle();

        let front = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = tri.intersect(&front).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-9);
        // Reported normal faces the incoming ray
        assert!(hit.normal.dot(front.direction()) < 0.0);

        let back = Ray::new(Vec3::new(20.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let hit = tri.intersect(&back).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-9);
        assert!(hit.normal.dot(back.direction()) < 0.0);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = triangle();

        // Hits the plane outside the triangle
        let ray = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::X);
        assert!(tri.intersect(&ray).is_none());

        // Pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        assert!(tri.intersect(&ray).is_none());

        // Parallel
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle() {
        let result = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        assert!(matches!(result, Err(SceneError::Degenerate(_))));
    }
}
