//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each pixel is still a
//! pure function of the scene, so the assembled image is identical to
//! the serial render.

use std::time::Instant;

use rayon::prelude::*;

use crate::renderer::{render_pixel, ImageBuffer, Rgb};
use crate::{RenderConfig, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// A `bucket_size` of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable, so equidistant buckets keep row-major order
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixels in row-major order within the bucket
    pub pixels: Vec<Rgb>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Rgb>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into their place in `image`.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let width = self.bucket.width as usize;
        for (row, chunk) in self.pixels.chunks(width).enumerate() {
            for (col, rgb) in chunk.iter().enumerate() {
                image.set(
                    self.bucket.x + col as u32,
                    self.bucket.y + row as u32,
                    *rgb,
                );
            }
        }
    }
}

/// Render a single bucket.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, config: &RenderConfig) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(scene, global_x, global_y, config));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Render the scene with buckets spread over the rayon thread pool.
pub fn render_parallel(scene: &Scene, config: &RenderConfig, bucket_size: u32) -> ImageBuffer {
    let camera = scene.camera();
    let mut image = ImageBuffer::new(camera.image_width(), camera.image_height());
    let buckets = generate_buckets(image.width, image.height, bucket_size);

    log::info!(
        "Rendering {}x{} in {} buckets on {} threads, depth {}",
        image.width,
        image.height,
        buckets.len(),
        rayon::current_num_threads(),
        config.max_depth
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, scene, config))
        .collect();

    for result in &results {
        result.write_into(&mut image);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
