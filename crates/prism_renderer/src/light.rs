//! Point and distant lights.
//!
//! Each light returns the color it contributes at a shading point.
//! Contributions from all lights are summed by the tracer.

use prism_math::{Color, Interval, Ray, Vec3, VectorExt};

use crate::{Intersection, RenderConfig, Scene, SceneError, SceneResult};

/// Omnidirectional light with distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub origin: Vec3,
    pub color: Color,
    /// Scales the inverse-distance falloff (larger is brighter)
    pub distance_coef: f64,
}

/// Light arriving from a fixed direction (parallel rays, no falloff).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistantLight {
    direction: Vec3,
    pub color: Color,
}

impl DistantLight {
    /// Create a distant light shining along `direction`.
    pub fn new(direction: Vec3, color: Color) -> SceneResult<Self> {
        Ok(Self {
            direction: direction.unit()?,
            color,
        })
    }

    /// Unit direction the light travels in.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

/// A light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point(PointLight),
    Distant(DistantLight),
}

impl Light {
    /// Create a point light.
    pub fn point(origin: Vec3, color: Color, distance_coef: f64) -> Self {
        Light::Point(PointLight {
            origin,
            color,
            distance_coef,
        })
    }

    /// Create a distant light.
    pub fn distant(direction: Vec3, color: Color) -> SceneResult<Self> {
        Ok(Light::Distant(DistantLight::new(direction, color)?))
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Point(l) => l.color,
            Light::Distant(l) => l.color,
        }
    }

    /// Check the light's parameters; `index` is used in the error.
    pub fn validate(&self, index: usize) -> SceneResult<()> {
        let invalid = |message: String| SceneError::InvalidLight { index, message };

        if !self.color().is_finite() {
            return Err(invalid(format!("color {} is not finite", self.color())));
        }
        if let Light::Point(l) = self {
            if !l.origin.is_finite() {
                return Err(invalid(format!("origin {} is not finite", l.origin)));
            }
            if !(l.distance_coef >= 0.0 && l.distance_coef.is_finite()) {
                return Err(invalid(format!(
                    "distance coefficient must be non-negative, got {}",
                    l.distance_coef
                )));
            }
        }
        Ok(())
    }

    /// Color this light adds at `hit`.
    ///
    /// Shadow rays skip the shaded primitive and are only blocked by
    /// opaque primitives.
    pub fn contribution(&self, scene: &Scene, hit: &Intersection, config: &RenderConfig) -> Color {
        match self {
            Light::Point(light) => light.contribution(scene, hit, config),
            Light::Distant(light) => light.contribution(scene, hit, config),
        }
    }
}

impl PointLight {
    fn contribution(&self, scene: &Scene, hit: &Intersection, config: &RenderConfig) -> Color {
        let to_light = self.origin - hit.point;
        let distance = to_light.length();
        // Light sits on the surface
        let Some(l) = to_light.try_normalize() else {
            return self.color;
        };

        let shadow = Ray::biased(hit.point, l, config.bias);
        let segment = Interval::FORWARD.with_max(distance - config.bias);
        if scene.occluded(&shadow, segment, &[hit.id]) {
            return Color::ZERO;
        }

        let reflective = hit.material().reflective;
        let intensity = self.distance_coef / (12.5 * distance.powf(2.0 - reflective / 5.0));
        let cos = hit.normal.dot(l);

        let mut power = (cos * intensity).max(config.ambient);
        if power > config.ambient {
            // Highlight, tighter for shinier surfaces
            power += reflective * cos.powf(100.0 * reflective);
        }

        self.color * power
    }
}

impl DistantLight {
    fn contribution(&self, scene: &Scene, hit: &Intersection, config: &RenderConfig) -> Color {
        let to_light = -self.direction;

        let shadow = Ray::biased(hit.point, to_light, config.bias);
        if scene.occluded(&shadow, Interval::FORWARD, &[hit.id]) {
            return Color::ZERO;
        }

        self.color * to_light.dot(hit.normal).max(0.0)
    }
}
