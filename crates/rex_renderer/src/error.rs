use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while building or rendering a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid image size {width}x{height} (must be 1..={max} on each side)", max = crate::MAX_IMAGE_SIZE)]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Scene has no camera")]
    MissingCamera,

    #[error("Sampler has no samples")]
    NoSamples,

    #[error("{count} samples per pixel exceeds the limit of {max}", max = crate::MAX_SAMPLES_PER_PIXEL)]
    TooManySamples { count: u32 },

    #[error("Out of memory allocating image: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("Scene must be built before rendering")]
    NotBuilt,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
