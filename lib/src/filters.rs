use crate::error::{Result, ensure_dimensions};
use image::{Rgba, RgbaImage};
use imageproc::map::map_pixels;

/// Rec. 709 luma weights, the same ones the CSS `grayscale()` filter uses
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Perceptual gray level of a pixel, rounded to the nearest integer
///
/// Formula: L = 0.2126*R + 0.7152*G + 0.0722*B
pub fn luma(pixel: Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    let luma = LUMA_WEIGHTS[0] * r as f32 + LUMA_WEIGHTS[1] * g as f32 + LUMA_WEIGHTS[2] * b as f32;

    // The weights sum to 1.0 give or take an ulp; rounding keeps gray pixels fixed.
    luma.round().clamp(0.0, 255.0) as u8
}

/// Convert an image to full grayscale at native resolution
///
/// R, G and B become the pixel's luma; alpha and dimensions are kept.
/// Applying it twice changes nothing the second time.
///
/// # Arguments
/// * `img` - Input RGBA image
///
/// # Returns
/// A new grayscale RGBA image
pub fn grayscale(img: &RgbaImage) -> Result<RgbaImage> {
    let (width, height) = img.dimensions();
    ensure_dimensions(width, height)?;

    Ok(map_pixels(img, |pixel: Rgba<u8>| {
        let l = luma(pixel);
        Rgba([l, l, l, pixel[3]])
    }))
}
