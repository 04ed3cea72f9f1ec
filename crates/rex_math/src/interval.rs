/// Open range `(min, max)` of accepted distances along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Every distance beyond `min`.
    pub const fn from_min(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// True if `t` lies strictly between the bounds.
    pub fn surrounds(&self, t: f32) -> bool {
        self.min < t && t < self.max
    }

    /// Lower the upper bound to `max`, never raising it.
    pub fn with_max(self, max: f32) -> Self {
        Self::new(self.min, self.max.min(max))
    }
}
