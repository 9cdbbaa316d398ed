//! Image rendering.
//!
//! Every pixel gets exactly one primary ray through its top-left corner,
//! so the image is a pure function of the scene and configuration.

use std::time::Instant;

use prism_core::RenderSettings;
use prism_math::{Color, Interval};

use crate::{trace, Scene, SceneError, SceneResult};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Maximum recursion depth for secondary rays
    pub max_depth: u32,
    /// Color returned by rays that miss everything or run out of depth
    pub background: Color,
    /// Minimum light a point light leaves on a lit surface
    pub ambient: f64,
    /// Offset applied to secondary ray origins
    pub bias: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            background: Color::splat(0.1),
            ambient: 0.1,
            bias: prism_math::EPSILON,
        }
    }
}

impl RenderConfig {
    /// Override fields that a scene file sets explicitly.
    pub fn apply(&mut self, settings: &RenderSettings) {
        if let Some(max_depth) = settings.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(background) = settings.background {
            self.background = background;
        }
        if let Some(ambient) = settings.ambient {
            self.ambient = ambient;
        }
        if let Some(bias) = settings.bias {
            self.bias = bias;
        }
    }

    /// Reject settings that would turn shading into NaN.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.ambient >= 0.0 && self.ambient.is_finite()) {
            return Err(SceneError::InvalidConfig(format!(
                "ambient must be non-negative, got {}",
                self.ambient
            )));
        }
        if !(self.bias > 0.0 && self.bias.is_finite()) {
            return Err(SceneError::InvalidConfig(format!(
                "bias must be positive, got {}",
                self.bias
            )));
        }
        if !self.background.is_finite() {
            return Err(SceneError::InvalidConfig(format!(
                "background {} is not finite",
                self.background
            )));
        }
        Ok(())
    }
}

/// An 8-bit RGB pixel.
pub type Rgb = [u8; 3];

/// Quantize one channel: `floor(c * 255)` clamped to the byte range.
#[inline]
fn quantize(c: f64) -> u8 {
    // NaN maps to 0
    (255.0 * Interval::UNIT.clamp(c)).floor() as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> Rgb {
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Row-major 8-bit RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: Rgb) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Flatten to packed RGB bytes (for saving).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Trace the primary ray of pixel (x, y) and quantize the result.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Rgb {
    let ray = scene.camera().get_ray(x, y);
    color_to_rgb(trace(&ray, scene, config.max_depth, config))
}

/// Render the entire scene on the calling thread.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let camera = scene.camera();
    let mut image = ImageBuffer::new(camera.image_width(), camera.image_height());

    log::info!(
        "Rendering {}x{} serially, depth {}",
        image.width,
        image.height,
        config.max_depth
    );
    let start = Instant::now();

    for y in 0..image.height {
        for x in 0..image.width {
            image.set(x, y, render_pixel(scene, x, y, config));
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
