//! Render output buffer.

use std::collections::TryReserveError;
use std::path::Path;

use crate::color_to_rgba;
use rex_math::Color;

/// A `width × height` grid of linear colors, stored row-major.
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Create a new black image, reporting allocation failure instead of aborting.
    pub fn try_new(width: u32, height: u32) -> Result<Self, TryReserveError> {
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, Color::ZERO);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
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

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw `f32` RGB data, for handing the buffer to an external sink.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to gamma-corrected RGBA bytes (for display).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode and write the image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let rgb = image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, _] = color_to_rgba(self.get(x, y));
            image::Rgb([r, g, b])
        });
        rgb.save(path)
    }
}
