//! Camera for primary ray generation.

use prism_core::CameraDescription;
use prism_math::{Ray, Vec3, VectorExt};

use crate::{SceneError, SceneResult};

/// Settings for building a [`Camera`].
#[derive(Debug, Clone, Copy)]
pub struct CameraBuilder {
    origin: Vec3,
    direction: Vec3,
    distance: f64,
    width: f64,
    height: f64,
    image_width: u32,
    image_height: u32,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::X,
            distance: 50.0,
            width: 50.0,
            height: 50.0,
            image_width: 400,
            image_height: 400,
        }
    }
}

impl CameraBuilder {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position and view direction.
    pub fn with_position(mut self, origin: Vec3, direction: Vec3) -> Self {
        self.origin = origin;
        self.direction = direction;
        self
    }

    /// Set viewport size and its distance from the origin.
    pub fn with_viewport(mut self, width: f64, height: f64, distance: f64) -> Self {
        self.width = width;
        self.height = height;
        self.distance = distance;
        self
    }

    /// Validate the settings and compute the viewport basis.
    pub fn build(self) -> SceneResult<Camera> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(SceneError::InvalidCamera(format!(
                "resolution must be non-zero, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        for (name, value) in [
            ("viewport width", self.width),
            ("viewport height", self.height),
            ("viewport distance", self.distance),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SceneError::InvalidCamera(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.origin.is_finite() {
            return Err(SceneError::InvalidCamera(format!(
                "origin {} is not finite",
                self.origin
            )));
        }

        let direction = self.direction.unit()?;

        // Rows step along ort1, which lies in the XY plane and never points
        // down; a view straight along Z falls back to X. Columns step along
        // ort2.
        let mut ort1 = Vec3::new(-direction.y, direction.x, 0.0)
            .try_normalize()
            .unwrap_or(Vec3::X);
        if ort1.y < 0.0 {
            ort1 = -ort1;
        }
        let ort2 = ort1.cross(direction).unit_or_zero();

        let upper_left = self.origin
            + direction * self.distance
            + ort1 * (self.height / 2.0)
            + ort2 * (self.width / 2.0);

        Ok(Camera {
            origin: self.origin,
            direction,
            ort1,
            ort2,
            upper_left,
            column_step: ort2 * (self.width / self.image_width as f64),
            row_step: ort1 * (self.height / self.image_height as f64),
            image_width: self.image_width,
            image_height: self.image_height,
        })
    }
}

/// Pinhole camera mapping pixels to primary rays.
///
/// Immutable once built; `get_ray` is a pure function of the pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    direction: Vec3,
    ort1: Vec3,
    ort2: Vec3,
    upper_left: Vec3,
    column_step: Vec3,
    row_step: Vec3,
    image_width: u32,
    image_height: u32,
}

impl Camera {
    /// Start building a camera from default settings.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// Build a camera from a scene file entry.
    pub fn from_description(desc: &CameraDescription) -> SceneResult<Self> {
        Self::builder()
            .with_position(desc.origin, desc.direction)
            .with_viewport(desc.width, desc.height, desc.distance)
            .with_resolution(desc.resolution[0], desc.resolution[1])
            .build()
    }

    /// Generate the primary ray for pixel (x, y), column `x` and row `y`.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let target = self.upper_left - self.column_step * x as f64 - self.row_step * y as f64;
        Ray::new(self.origin, target - self.origin)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Orthonormal viewport axes: `ort1` (vertical), `ort2` (horizontal).
    pub fn basis(&self) -> (Vec3, Vec3) {
        (self.ort1, self.ort2)
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }
}
