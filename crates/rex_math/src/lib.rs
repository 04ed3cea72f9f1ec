// Re-export glam for convenience
pub use glam::*;

// Rex math types
mod bounding_box;
mod interval;
mod ray;

pub use bounding_box::{BoundingBox, ContainmentType};
pub use interval::Interval;
pub use ray::Ray;

/// Linear RGB color (components typically 0-1, unbounded above).
pub type Color = Vec3;
