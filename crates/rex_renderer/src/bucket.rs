//! Tile scheduling for parallel rendering.
//!
//! The image is cut into square buckets that rayon workers render
//! independently. Each bucket only reads the shared [`RenderJob`], and the
//! finished tiles are copied into the image on the calling thread.

use crate::renderer::{render_pixel, RenderJob};
use crate::Image;
use rex_math::Color;

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Left edge, in pixels
    pub x: u32,
    /// Top edge, in pixels
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Squared distance from the bucket's center to (cx, cy).
    fn distance_sq_to(&self, cx: f32, cy: f32) -> f32 {
        let bx = self.x as f32 + self.width as f32 * 0.5;
        let by = self.y as f32 + self.height as f32 * 0.5;
        (bx - cx).powi(2) + (by - cy).powi(2)
    }
}

/// Split a `width × height` image into buckets, center buckets first.
///
/// Edge buckets are clipped to the image. A `bucket_size` of zero is
/// treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(size as usize) {
        for x in (0..width).step_by(size as usize) {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    // Render outward from the center; the stable sort keeps row order for ties
    let (cx, cy) = (width as f32 * 0.5, height as f32 * 0.5);
    buckets.sort_by(|a, b| a.distance_sq_to(cx, cy).total_cmp(&b.distance_sq_to(cx, cy)));

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Render every pixel in `bucket`, row-major within the bucket.
pub fn render_bucket(bucket: &Bucket, job: &RenderJob<'_>) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(render_pixel(job, bucket.x + local_x, bucket.y + local_y));
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

/// Pixels produced for one bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Copy the tile into its place in `image`.
    pub fn write_into(&self, image: &mut Image) {
        let Bucket {
            x, y, width, ..
        } = self.bucket;

        for (i, color) in self.pixels.iter().enumerate() {
            let i = i as u32;
            image.set(x + i % width, y + i / width, *color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_pixels(buckets: &[Bucket]) -> usize {
        buckets.iter().map(Bucket::pixel_count).sum()
    }

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(64, 64, 32);
        assert_eq!(buckets.len(), 4);
        assert_eq!(total_pixels(&buckets), 64 * 64);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 32);
        assert_eq!(buckets.len(), 4 * 3);
        assert_eq!(total_pixels(&buckets), 100 * 70);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 70));
    }

    #[test]
    fn test_center_bucket_first() {
        let buckets = generate_buckets(96, 96, 32);
        assert_eq!(buckets.len(), 9);
        assert_eq!((buckets[0].x, buckets[0].y), (32, 32));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_zero_bucket_size_and_empty_image() {
        assert_eq!(generate_buckets(3, 2, 0).len(), 6);
        assert!(generate_buckets(0, 10, 32).is_empty());
    }

    #[test]
    fn test_write_into_places_tile() {
        let mut image = Image::new(4, 4);
        let result = BucketResult {
            bucket: Bucket::new(2, 1, 2, 2, 0),
            pixels: vec![Color::X, Color::Y, Color::Z, Color::ONE],
        };
        result.write_into(&mut image);

        assert_eq!(image.get(2, 1), Color::X);
        assert_eq!(image.get(3, 1), Color::Y);
        assert_eq!(image.get(2, 2), Color::Z);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }
}
