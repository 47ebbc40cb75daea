//! Decoding input bytes and encoding results

use crate::error::{Result, TransformError, ensure_dimensions};
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

/// Decode image bytes into RGBA, reporting the detected format
pub fn decode(bytes: &[u8]) -> Result<(RgbaImage, ImageFormat)> {
    let format = image::guess_format(bytes).map_err(TransformError::Decode)?;
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(TransformError::Decode)?
        .to_rgba8();

    let (width, height) = image.dimensions();
    ensure_dimensions(width, height)?;
    debug!("Decoded {:?} image {}x{}", format, width, height);

    Ok((image, format))
}

/// Encode an RGBA image in `format`
///
/// JPEG and PNM are written from the RGB channels only.
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TransformError::Encode(format!(
            "cannot encode a {}x{} image",
            width, height
        )));
    }

    let dynamic = if supports_alpha(format) {
        DynamicImage::ImageRgba8(image.clone())
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8())
    };

    let mut bytes = Vec::new();
    dynamic
        .write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|e| TransformError::Encode(e.to_string()))?;

    debug!("Encoded {}x{} image as {:?} ({} bytes)", width, height, format, bytes.len());
    Ok(bytes)
}

fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg | ImageFormat::Pnm)
}

/// Name of the output file for `name` written as `format`
///
/// The last extension is replaced; names without one get it appended.
pub fn output_file_name(name: &str, format: ImageFormat) -> String {
    let extension = format.extensions_str().first().copied().unwrap_or("png");
    Path::new(name)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}
