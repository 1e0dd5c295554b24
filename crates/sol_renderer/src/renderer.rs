//! Image rendering.
//!
//! Implements the per-pixel driver around `shade`:
//! - One primary ray per pixel through the pinhole camera
//! - Rows rendered in parallel with rayon
//! - One seeded generator per row, so output does not depend on scheduling

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::World;
use crate::shading::shade;
use crate::Camera;
use sol_core::Color;

/// Errors produced while rendering or writing images.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render cancelled after {completed} of {total} rows")]
    Cancelled { completed: usize, total: usize },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer of {len} bytes does not match {width}x{height}")]
    InvalidBuffer { width: u32, height: u32, len: usize },
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Reflection bounces allowed after the primary hit
    pub max_depth: i32,
    /// Shadow rays per light at the primary hit
    pub shadow_samples: u32,
    /// Reflection rays at the primary hit
    pub reflection_samples: u32,
    /// Jitter radius for shadow rays (soft shadows)
    pub shadow_spread: f32,
    /// Jitter radius for reflection rays (glossy reflection)
    pub reflection_spread: f32,
    /// Offset along the normal for secondary ray origins, in scene units
    pub bias: f32,
    /// Base seed for the per-row generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            shadow_samples: 1,
            reflection_samples: 1,
            shadow_spread: 0.0,
            reflection_spread: 0.0,
            bias: 0.001,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Sample count at a given remaining depth.
    ///
    /// Halved for every bounce below `max_depth`, never below one.
    pub fn samples_at_depth(&self, base: u32, depth: i32) -> u32 {
        let level = self.max_depth.saturating_sub(depth).clamp(0, 31) as u32;
        (base >> level).max(1)
    }

    /// True if any stochastic sampling is enabled.
    pub fn is_stochastic(&self) -> bool {
        (self.shadow_samples > 1 && self.shadow_spread != 0.0)
            || (self.reflection_samples > 1 && self.reflection_spread != 0.0)
    }
}

/// Image buffer of unclamped linear colors, row-major.
#[derive(Debug, Clone, PartialEq)]
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

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[y as usize * self.width as usize + x as usize] = color;
    }
}

/// Seed for the generator owned by one row.
fn row_seed(seed: u64, row: u32) -> u64 {
    // splitmix64 step so neighbouring rows get unrelated streams
    let mut z = seed.wrapping_add((row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn World,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let ray = camera.get_ray(x, y);
    shade(world, &ray, config.max_depth, config, rng)
}

/// Render the entire scene to an image buffer.
pub fn render(camera: &Camera, world: &dyn World, config: &RenderConfig) -> ImageBuffer {
    let (image, _) = render_rows(camera, world, config, &AtomicBool::new(false));
    image
}

/// Render the entire scene, stopping early once `cancel` is set.
///
/// Cancellation is checked before each row starts; rows already in
/// flight finish.
pub fn render_with_cancel(
    camera: &Camera,
    world: &dyn World,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Result<ImageBuffer, RenderError> {
    let (image, completed) = render_rows(camera, world, config, cancel);
    let total = image.height as usize;

    if completed < total {
        return Err(RenderError::Cancelled { completed, total });
    }
    Ok(image)
}

/// Returns the image and the number of rows actually rendered.
fn render_rows(
    camera: &Camera,
    world: &dyn World,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> (ImageBuffer, usize) {
    let width = camera.image_width;
    let height = camera.image_height;
    let mut image = ImageBuffer::new(width, height);
    if width == 0 || height == 0 {
        return (image, height as usize);
    }

    log::info!(
        "Rendering {}x{} (depth {}, {} shadow / {} reflection samples)",
        width,
        height,
        config.max_depth,
        config.shadow_samples,
        config.reflection_samples
    );
    let start = Instant::now();
    let completed = AtomicUsize::new(0);

    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }

            let y = y as u32;
            let mut rng = StdRng::seed_from_u64(row_seed(config.seed, y));
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(camera, world, x as u32, y, config, &mut rng);
            }

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::trace!("Row {} done ({}/{})", y, done, height);
        });

    let completed = completed.into_inner();
    log::info!(
        "Rendered {} of {} rows in {:?}",
        completed,
        height,
        start.elapsed()
    );

    (image, completed)
}
