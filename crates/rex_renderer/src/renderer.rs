//! Per-pixel rendering and render settings.
//!
//! Implements:
//! - Multi-sampling through a shared [`Sampler`] pattern
//! - Gamma correction for 8-bit output

use crate::{Camera, Sampler, SamplerKind, SceneContext, Tracer, ViewPlane, DEFAULT_MAX_DEPTH};
use rex_math::Color;
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Placement of samples inside each pixel
    pub sampler: SamplerKind,
    /// Seed for the jittered sampler
    pub seed: u64,
    /// Recursion cap for the default tracer
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// World-space size of a pixel on the view plane
    pub pixel_size: f32,
    /// Edge length of the square tiles handed to worker threads
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            sampler: SamplerKind::Regular,
            seed: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            background: Color::ZERO,
            pixel_size: 1.0,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Everything needed to render pixels of a built scene.
///
/// Only holds shared references, so a single job is used by every thread.
#[derive(Clone, Copy)]
pub struct RenderJob<'a> {
    pub camera: &'a Camera,
    pub sampler: &'a Sampler,
    pub view_plane: &'a ViewPlane,
    pub tracer: &'a dyn Tracer,
    pub ctx: SceneContext<'a>,
}

/// Render a single pixel, averaging all of the sampler's offsets.
pub fn render_pixel(job: &RenderJob<'_>, x: u32, y: u32) -> Color {
    let samples = job.sampler.samples();
    if samples.is_empty() {
        return job.ctx.background;
    }

    let mut pixel_color = Color::ZERO;
    for &offset in samples {
        let ray = job.camera.generate_ray(x, y, offset, job.view_plane);
        pixel_color += job.tracer.trace(&ray, &job.ctx, 0);
    }

    // Average the samples
    pixel_color / samples.len() as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    // NaN components clamp to 0 through linear_to_gamma
    let to_byte = |c: f32| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}
