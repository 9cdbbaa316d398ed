//! Intersection contract, the closed primitive variant and nearest-hit search.

use prism_core::Material;
use prism_math::{Interval, Ray, Vec3};

use crate::{Plane, Sphere, Triangle};

/// Geometric result of a ray hitting a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Distance along the ray (always > 0)
    pub distance: f64,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the point
    pub normal: Vec3,
}

/// Ray-surface intersection shared by every primitive kind.
pub trait Hittable {
    /// Nearest strictly-positive intersection along `ray`, if any.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit>;

    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;
}

/// Closed set of primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Plane(p) => p.intersect(ray),
            Shape::Triangle(t) => t.intersect(ray),
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(p) => p.normal_at(point),
            Shape::Triangle(t) => t.normal_at(point),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// Identity of a primitive within its scene.
///
/// Used for "ignore this primitive" checks instead of comparing geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub usize);

/// A shape with its material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

impl Primitive {
    /// Create a new primitive.
    pub fn new(shape: impl Into<Shape>, material: Material) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }
}

/// Record of a ray hitting a scene primitive.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Distance along the ray
    pub distance: f64,
    /// Unit surface normal at the point
    pub normal: Vec3,
    /// Which primitive was hit
    pub id: PrimitiveId,
    /// The primitive itself
    pub primitive: &'a Primitive,
}

impl<'a> Intersection<'a> {
    /// Material of the hit primitive.
    #[inline]
    pub fn material(&self) -> &'a Material {
        &self.primitive.material
    }
}

/// Linear scan for the closest strictly-positive hit, skipping `ignore`.
pub fn nearest_hit<'a>(
    primitives: &'a [Primitive],
    ray: &Ray,
    ignore: &[PrimitiveId],
) -> Option<Intersection<'a>> {
    let mut closest: Option<Intersection<'a>> = None;
    let mut window = Interval::FORWARD;

    for (index, primitive) in primitives.iter().enumerate() {
        let id = PrimitiveId(index);
        if ignore.contains(&id) {
            continue;
        }

        if let Some(hit) = primitive.shape.intersect(ray) {
            if window.surrounds(hit.distance) {
                window = window.with_max(hit.distance);
                closest = Some(Intersection {
                    point: hit.point,
                    distance: hit.distance,
                    normal: hit.normal,
                    id,
                    primitive,
                });
            }
        }
    }

    closest
}

/// True if any opaque primitive outside `ignore` is hit strictly inside `window`.
///
/// Transparent primitives never block; an opaque one behind them still does.
pub fn occluded(
    primitives: &[Primitive],
    ray: &Ray,
    window: Interval,
    ignore: &[PrimitiveId],
) -> bool {
    primitives.iter().enumerate().any(|(index, primitive)| {
        !primitive.material.is_transparent()
            && !ignore.contains(&PrimitiveId(index))
            && primitive
                .shape
                .intersect(ray)
                .is_some_and(|hit| window.surrounds(hit.distance))
    })
}
