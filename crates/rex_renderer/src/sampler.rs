//! Sub-pixel sample patterns for anti-aliasing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rex_math::Vec2;
use serde::{Deserialize, Serialize};

/// Largest accepted sample count per pixel (a 256 × 256 grid).
pub const MAX_SAMPLES_PER_PIXEL: u32 = 256 * 256;

/// How sample offsets are placed inside a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplerKind {
    /// Cell centers of an n × n grid.
    #[default]
    Regular,
    /// One random point inside each cell of an n × n grid.
    Jittered,
}

/// A fixed, restartable set of offsets in the unit square.
///
/// The same pattern is used for every pixel, so it is generated once and
/// shared read-only by all render threads.
#[derive(Debug, Clone)]
pub struct Sampler {
    kind: SamplerKind,
    samples: Vec<Vec2>,
}

impl Sampler {
    /// Create a sampler with roughly `count` samples.
    ///
    /// Samples are laid out on an `n × n` grid with `n = round(sqrt(count))`,
    /// so non-square counts are rounded. A count of zero gives an empty sampler,
    /// and counts above [`MAX_SAMPLES_PER_PIXEL`] are clamped to it.
    pub fn new(kind: SamplerKind, count: u32, seed: u64) -> Self {
        if count > MAX_SAMPLES_PER_PIXEL {
            log::warn!(
                "Sample count {} exceeds the limit, using {}",
                count,
                MAX_SAMPLES_PER_PIXEL
            );
        }
        let count = count.min(MAX_SAMPLES_PER_PIXEL);
        if count == 0 {
            return Self {
                kind,
                samples: Vec::new(),
            };
        }

        let n = ((count as f32).sqrt().round() as usize).max(1);
        if (n * n) as u32 != count {
            log::warn!(
                "Sample count {} is not a perfect square, using {} ({}x{})",
                count,
                n * n,
                n,
                n
            );
        }

        let inv_n = 1.0 / n as f32;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(n * n);

        for j in 0..n {
            for i in 0..n {
                let (dx, dy) = match kind {
                    SamplerKind::Regular => (0.5, 0.5),
                    SamplerKind::Jittered => (rng.gen::<f32>(), rng.gen::<f32>()),
                };
                samples.push(Vec2::new((i as f32 + dx) * inv_n, (j as f32 + dy) * inv_n));
            }
        }

        Self { kind, samples }
    }

    /// Regular grid sampler.
    pub fn regular(count: u32) -> Self {
        Self::new(SamplerKind::Regular, count, 0)
    }

    /// Jittered grid sampler drawing from a generator seeded with `seed`.
    pub fn jittered(count: u32, seed: u64) -> Self {
        Self::new(SamplerKind::Jittered, count, seed)
    }

    pub fn kind(&self) -> SamplerKind {
        self.kind
    }

    /// Sample offsets, each in `[0, 1)²`.
    pub fn samples(&self) -> &[Vec2] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::regular(1)
    }
}
