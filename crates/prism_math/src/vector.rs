//! Vector algebra helpers on top of glam's `DVec3`.
//!
//! glam already covers dot, cross, length, add/sub and scaling. This
//! module adds the operations the tracer needs with explicit handling of
//! degenerate (zero length) input.

use glam::DVec3;
use thiserror::Error;

/// Errors raised by vector operations on degenerate input.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a zero-length or non-finite vector ({0})")]
    DegenerateVector(DVec3),
}

/// Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;

/// Extra vector operations used by the tracer.
pub trait VectorExt: Sized {
    /// Unit vector in the same direction, or `DegenerateVector`.
    fn unit(self) -> MathResult<Self>;

    /// Unit vector in the same direction, or the zero vector.
    ///
    /// Never produces NaN components.
    fn unit_or_zero(self) -> Self;

    /// Raise every component to `exponent`.
    fn component_pow(self, exponent: f64) -> Self;

    /// Mirror `self` about the plane with unit normal `normal`.
    fn mirror(self, normal: Self) -> Self;

    /// Bend `self` through a surface with outward unit normal `normal`.
    ///
    /// `index` is the refractive index of the medium behind the surface.
    /// A negative `self . normal` means the ray enters the medium, otherwise
    /// it leaves it and the normal and index ratio are inverted.
    /// Returns `None` on total internal reflection.
    fn refract_through(self, normal: Self, index: f64) -> Option<Self>;
}

impl VectorExt for DVec3 {
    fn unit(self) -> MathResult<Self> {
        self.try_normalize().ok_or(MathError::DegenerateVector(self))
    }

    #[inline]
    fn unit_or_zero(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn component_pow(self, exponent: f64) -> Self {
        DVec3::new(
            self.x.powf(exponent),
            self.y.powf(exponent),
            self.z.powf(exponent),
        )
    }

    #[inline]
    fn mirror(self, normal: Self) -> Self {
        self - 2.0 * self.dot(normal) * normal
    }

    fn refract_through(self, normal: Self, index: f64) -> Option<Self> {
        let mut cs = self.dot(normal);
        let (normal, ratio) = if cs < 0.0 {
            cs = -cs;
            (normal, 1.0 / index)
        } else {
            (-normal, index)
        };

        let k = 1.0 - ratio * ratio * (1.0 - cs * cs);
        if k < 0.0 {
            return None;
        }

        Some(self * ratio + normal * (ratio * cs - k.sqrt()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_unit() {
        let v = DVec3::new(3.0, 0.0, 4.0).unit().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!(approx_eq(v, DVec3::new(0.6, 0.0, 0.8)));
    }

    #[test]
    fn test_unit_degenerate() {
        assert_eq!(
            DVec3::ZERO.unit(),
            Err(MathError::DegenerateVector(DVec3::ZERO))
        );
        assert!(DVec3::new(f64::NAN, 0.0, 0.0).unit().is_err());
    }

    #[test]
    fn test_unit_or_zero() {
        assert_eq!(DVec3::ZERO.unit_or_zero(), DVec3::ZERO);
        assert!(approx_eq(DVec3::new(0.0, 2.0, 0.0).unit_or_zero(), DVec3::Y));
    }

    #[test]
    fn test_component_pow() {
        let v = DVec3::new(2.0, 3.0, 4.0).component_pow(2.0);
        assert_eq!(v, DVec3::new(4.0, 9.0, 16.0));

        let roots = DVec3::new(4.0, 9.0, 16.0).component_pow(0.5);
        assert!(approx_eq(roots, DVec3::new(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_mirror_normal_incidence() {
        let d = DVec3::new(0.0, -1.0, 0.0);
        assert_eq!(d.mirror(DVec3::Y), DVec3::Y);
    }

    #[test]
    fn test_mirror_oblique() {
        let d = DVec3::new(1.0, -1.0, 0.0).normalize();
        let r = d.mirror(DVec3::Y);
        assert!(approx_eq(r, DVec3::new(1.0, 1.0, 0.0).normalize()));
    }

    #[test]
    fn test_refract_through_equal_indices_is_undeviated() {
        let d = DVec3::new(1.0, -2.0, 0.5).normalize();

        // Entering
        let entering = d.refract_through(DVec3::Y, 1.0).unwrap();
        assert!(approx_eq(entering, d));

        // Leaving
        let leaving = d.refract_through(-DVec3::Y, 1.0).unwrap();
        assert!(approx_eq(leaving, d));
    }

    #[test]
    fn test_refract_through_bends_towards_normal() {
        let d = DVec3::new(1.0, -1.0, 0.0).normalize();
        let t = d.refract_through(DVec3::Y, 1.5).unwrap();

        // sin(theta_t) = sin(theta_i) / 1.5
        let sin_i = d.x.abs();
        let sin_t = t.x.abs() / t.length();
        assert!((sin_t - sin_i / 1.5).abs() < 1e-9);
        assert!(t.y < 0.0);
    }

    #[test]
    fn test_refract_through_total_internal_reflection() {
        // Leaving glass at a grazing angle
        let d = DVec3::new(1.0, 0.2, 0.0).normalize();
        assert!(d.refract_through(DVec3::Y, 1.5).is_none());
    }
}
