use crate::{VectorExt, Vec3};

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays are immutable once built. The constructor normalizes the
/// direction, so intersection code can rely on `|direction| == 1`
/// (or a zero direction for degenerate input, which hits nothing useful).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` does not need to be normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.unit_or_zero(),
        }
    }

    /// Create a secondary ray whose origin is pushed `bias` units along
    /// its own direction, so it does not immediately re-hit the surface
    /// it leaves.
    pub fn biased(origin: Vec3, direction: Vec3, bias: f64) -> Self {
        let direction = direction.unit_or_zero();
        Self {
            origin: origin + direction * bias,
            direction,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at distance t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
