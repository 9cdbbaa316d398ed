//! Surface materials for the Whitted tracer.
//!
//! A material carries a base color, a reflective coefficient, a
//! transparency weight with its refractive index, an optional procedural
//! pattern and a "constant color" flag that bypasses lighting entirely.

use prism_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a material has out-of-range coefficients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("refractive index must be at least 1, got {0}")]
    InvalidRefractiveIndex(f64),

    #[error("pattern scale must be positive, got {0}")]
    InvalidPatternScale(f64),

    #[error("color has a non-finite component: {0}")]
    NonFiniteColor(Vec3),
}

/// Procedural pattern applied to the base color before lighting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    /// Plain base color.
    #[default]
    Solid,
    /// 3D checkerboard with cells `scale * pi` wide.
    Checker { scale: f64 },
}

impl Pattern {
    /// Multiplier applied to the base color at `point` (1 or 0).
    pub fn factor(&self, point: Vec3) -> f64 {
        match *self {
            Pattern::Solid => 1.0,
            Pattern::Checker { scale } => {
                let s = |v: f64| sign((v / scale).sin());
                if s(point.x) * s(point.y) * s(point.z) > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Sign with zero counted as positive.
#[inline]
fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Surface description shared by every primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base color (RGB, 0-1)
    pub color: Color,

    /// Fraction of the final color taken from the mirror direction
    pub reflective: f64,

    /// Fraction of the final color transmitted through the surface (0 = opaque)
    pub refractive: f64,

    /// Index of refraction of the medium behind the surface
    pub refractive_index: f64,

    /// Procedural pattern modulating the base color
    pub pattern: Pattern,

    /// Return the base color as-is, skipping lights and secondary rays
    pub constant_color: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ZERO,
            reflective: 0.0,
            refractive: 0.0,
            refractive_index: 1.0,
            pattern: Pattern::Solid,
            constant_color: false,
        }
    }
}

impl Material {
    /// Create an opaque, matte material with the given color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Create a material that ignores lighting and always shows `color`.
    pub fn constant(color: Color) -> Self {
        Self {
            color,
            constant_color: true,
            ..Default::default()
        }
    }

    /// Set the reflective coefficient.
    pub fn with_reflective(mut self, reflective: f64) -> Self {
        self.reflective = reflective;
        self
    }

    /// Set the transparency weight and refractive index.
    pub fn with_refraction(mut self, refractive: f64, refractive_index: f64) -> Self {
        self.refractive = refractive;
        self.refractive_index = refractive_index;
        self
    }

    /// Set the procedural pattern.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// True if light passes through this surface.
    pub fn is_transparent(&self) -> bool {
        self.refractive > 0.0
    }

    /// Base color after the procedural pattern at `point`.
    pub fn surface_color(&self, point: Vec3) -> Color {
        self.color * self.pattern.factor(point)
    }

    /// Check that every coefficient is inside its documented range.
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !self.color.is_finite() {
            return Err(MaterialError::NonFiniteColor(self.color));
        }
        for (field, value) in [
            ("reflective", self.reflective),
            ("refractive", self.refractive),
        ] {
            // Also rejects NaN
            if !(0.0..=1.0).contains(&value) {
                return Err(MaterialError::OutOfUnitRange { field, value });
            }
        }
        if !(self.refractive_index >= 1.0 && self.refractive_index.is_finite()) {
            return Err(MaterialError::InvalidRefractiveIndex(self.refractive_index));
        }
        if let Pattern::Checker { scale } = self.pattern {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(MaterialError::InvalidPatternScale(scale));
            }
        }
        Ok(())
    }
}
