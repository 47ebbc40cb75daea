use crate::error::{Result, TransformError, ensure_dimensions};
use image::{RgbaImage, imageops};
use imageops::FilterType;
use log::debug;

/// Scale an image to fit within a bounding box, preserving aspect ratio
///
/// Images already inside the box are returned unchanged; this never upscales.
///
/// # Arguments
/// * `input` - The source image
/// * `max_width` - Bounding box width, must be positive
/// * `max_height` - Bounding box height, must be positive
/// * `filter` - Resampling filter
pub fn fit_within(
    input: &RgbaImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<RgbaImage> {
    if max_width == 0 || max_height == 0 {
        return Err(TransformError::InvalidInput(format!(
            "bounding box must be positive, got {}x{}",
            max_width, max_height
        )));
    }

    let (width, height) = input.dimensions();
    ensure_dimensions(width, height)?;

    if width <= max_width && height <= max_height {
        return Ok(input.clone());
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    // Never round a side down to nothing
    let new_width = ((width as f64 * ratio).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * ratio).round() as u32).clamp(1, max_height);

    debug!(
        "Resizing {}x{} -> {}x{} (fit within {}x{})",
        width, height, new_width, new_height, max_width, max_height
    );
    Ok(imageops::resize(input, new_width, new_height, filter))
}

/// Shrink an image by a fixed integer factor along each axis
///
/// New dimensions are `floor(width / factor)` by `floor(height / factor)`.
/// A factor of 1 returns the input unchanged; a result with a zero side
/// is rejected rather than produced.
pub fn downscale_by(input: &RgbaImage, factor: u32, filter: FilterType) -> Result<RgbaImage> {
    if factor == 0 {
        return Err(TransformError::InvalidInput(
            "downscale factor must be positive".to_string(),
        ));
    }

    let (width, height) = input.dimensions();
    ensure_dimensions(width, height)?;

    if factor == 1 {
        return Ok(input.clone());
    }

    let new_width = width / factor;
    let new_height = height / factor;
    ensure_dimensions(new_width, new_height)?;

    debug!(
        "Downscaling {}x{} by {} -> {}x{}",
        width, height, factor, new_width, new_height
    );
    Ok(imageops::resize(input, new_width, new_height, filter))
}
