/// Image-plane description used to map pixels to camera rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPlane {
    pub width: u32,
    pub height: u32,
    /// World-space size of one pixel on the view plane
    pub pixel_size: f32,
    pub sample_count: u32,
}

impl ViewPlane {
    pub fn new(width: u32, height: u32, pixel_size: f32) -> Self {
        Self {
            width,
            height,
            pixel_size,
            sample_count: 1,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for ViewPlane {
    fn default() -> Self {
        Self::new(0, 0, 1.0)
    }
}
