//! Image rendering.
//!
//! Renders a [`Scene`] with:
//! - Jittered N×N anti-aliasing per pixel
//! - Parallel bucket rendering via rayon
//! - 8-bit PNG output (colors clamped, no gamma curve)

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Color, Sampler, Scene};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel along each axis (N for an N×N grid)
    pub samples_per_pixel: u32,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Seed for the sample jitter
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            samples_per_pixel: 2,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_samples(mut self, per_axis: u32) -> Self {
        self.samples_per_pixel = per_axis;
        self
    }

    pub fn with_bucket_size(mut self, size: u32) -> Self {
        self.bucket_size = size.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn sampler(&self) -> Sampler {
        Sampler::new(self.samples_per_pixel)
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        (255.0 * clamp_01(color.x)) as u8,
        (255.0 * clamp_01(color.y)) as u8,
        (255.0 * clamp_01(color.z)) as u8,
    ]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel<R: Rng + ?Sized>(
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut R,
) -> Color {
    let samples = config
        .sampler()
        .pixel_samples(x, y, config.width, config.height, rng);

    let mut pixel_color = Color::ZERO;
    for &(u, v) in &samples {
        pixel_color += scene.trace_uv(u, v);
    }

    // Average the samples
    pixel_color / samples.len() as f32
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Row-major offset of (x, y), computed in `usize`.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[local_y as usize * bucket.width as usize + local_x as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    /// Convert to RGB bytes, row-major from the top-left pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb(self.get(x, y)))
        })
    }

    /// Write the image as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are rendered in parallel, from the image center outwards. Each
/// bucket seeds its own generator from `config.seed` and its position, so
/// the result does not depend on thread scheduling.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(config.width, config.height, config.bucket_size.max(1));

    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets",
        config.width,
        config.height,
        config.sampler().samples_per_pixel(),
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let seed = config.seed ^ (((bucket.y as u64) << 32) | bucket.x as u64);
            let mut rng = StdRng::seed_from_u64(seed);
            BucketResult::new(*bucket, render_bucket(bucket, scene, config, &mut rng))
        })
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }
    image
}
