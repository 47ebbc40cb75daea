//! Error types for the transform pipeline
//!
//! Every stage fails with one of these variants and never hands back a
//! partially filled buffer, so a caller can decide per image whether to
//! skip or retry.

use thiserror::Error;

/// Errors produced while decoding, tiling, filtering or encoding an image
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input bytes are not a valid or supported raster format
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// A zero-sized image showed up somewhere in the pipeline
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The glyph atlas is missing or does not match the tile layout
    #[error("failed to load glyph atlas: {0}")]
    AtlasLoad(String),

    /// Output serialization could not complete
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// A value outside the range an operation accepts
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Rejected `TilerConfig`
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Fails with `InvalidDimensions` if either side is zero
pub fn ensure_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    Ok(())
}
