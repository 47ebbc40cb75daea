use crate::atlas::GlyphAtlas;
use crate::error::{Result, TransformError, ensure_dimensions};
use image::{Rgba, RgbaImage};
use log::debug;
use rayon::prelude::*;

/// Unweighted mean of the R, G and B channels, alpha ignored
///
/// Kept real-valued so values just below a tile boundary are not pulled
/// into the lower tile.
pub fn luminance(pixel: &Rgba<u8>) -> f64 {
    (pixel[0] as f64 + pixel[1] as f64 + pixel[2] as f64) / 3.0
}

/// Map a gray level in [0, 255] to one of `tile_count` tiles
///
/// `floor(gray / 255 * tile_count)`, with gray == 255 clamped onto the last
/// tile instead of one past it.
pub fn tile_index(gray: f64, tile_count: u32) -> Result<u32> {
    if tile_count == 0 {
        return Err(TransformError::InvalidInput(
            "tile count must be positive".to_string(),
        ));
    }
    if !(0.0..=255.0).contains(&gray) {
        return Err(TransformError::InvalidInput(format!(
            "gray level {} outside [0, 255]",
            gray
        )));
    }

    let t = gray / 255.0;
    let index = (t * tile_count as f64).floor() as u32;
    Ok(index.min(tile_count - 1))
}

/// Replace every source pixel with the atlas tile picked by its luminance
///
/// The output is `tile_size` times larger than the source along each axis.
/// Each output block is independent, so rows of blocks are filled in parallel.
///
/// # Arguments
/// * `source` - Image to convert, one tile per pixel
/// * `atlas` - Glyph atlas to sample tiles from
///
/// # Returns
/// The tiled image, or an error without any partial output
pub fn render_tiles(source: &RgbaImage, atlas: &GlyphAtlas) -> Result<RgbaImage> {
    let (width, height) = source.dimensions();
    ensure_dimensions(width, height)?;

    let tile_size = atlas.tile_size();
    let tile_count = atlas.tile_count();
    let out_width = width
        .checked_mul(tile_size)
        .ok_or(TransformError::InvalidDimensions { width, height })?;
    let out_height = height
        .checked_mul(tile_size)
        .ok_or(TransformError::InvalidDimensions { width, height })?;

    debug!(
        "Tiling {}x{} source with {} tiles of {}px -> {}x{}",
        width, height, tile_count, tile_size, out_width, out_height
    );

    // Quantize first so a bad pixel fails before anything is written
    let indices = source
        .pixels()
        .map(|pixel| tile_index(luminance(pixel), tile_count))
        .collect::<Result<Vec<u32>>>()?;

    let tile_bytes = (tile_size * 4) as usize;
    let out_stride = out_width as usize * 4;
    let mut buffer = vec![0u8; out_stride * out_height as usize];

    // One chunk per source row: tile_size output rows
    buffer
        .par_chunks_mut(out_stride * tile_size as usize)
        .zip(indices.par_chunks(width as usize))
        .for_each(|(band, row_indices)| {
            for local_y in 0..tile_size {
                let out_row = &mut band[local_y as usize * out_stride..][..out_stride];
                for (x, &index) in row_indices.iter().enumerate() {
                    out_row[x * tile_bytes..][..tile_bytes]
                        .copy_from_slice(atlas.tile_row(index, local_y));
                }
            }
        });

    RgbaImage::from_raw(out_width, out_height, buffer).ok_or(
        TransformError::InvalidDimensions {
            width: out_width,
            height: out_height,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    /// Atlas whose tile `i` is filled with gray level `i`
    fn numbered_atlas(tile_size: u32, tile_count: u32) -> GlyphAtlas {
        let image = RgbaImage::from_fn(tile_size * tile_count, tile_size, |x, _| {
            let v = (x / tile_size) as u8;
            Rgba([v, v, v, 255])
        });
        GlyphAtlas::from_image(image, tile_size, tile_count).unwrap()
    }

    #[test]
    fn test_luminance_mean() {
        assert_eq!(luminance(&Rgba([0, 0, 0, 255])), 0.0);
        assert_eq!(luminance(&Rgba([255, 255, 255, 0])), 255.0);
        assert_eq!(luminance(&Rgba([30, 60, 90, 7])), 60.0);
    }

    #[test]
    fn test_luminance_not_truncated() {
        let gray = luminance(&Rgba([1, 0, 0, 255]));
        assert!((gray - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_tile_index_boundaries() {
        assert_eq!(tile_index(0.0, 9).unwrap(), 0);
        assert_eq!(tile_index(255.0, 9).unwrap(), 8);
        assert_eq!(tile_index(254.9, 9).unwrap(), 8);
    }

    #[test]
    fn test_tile_index_linear_steps() {
        // 255 / 9 ≈ 28.33 gray levels per tile
        assert_eq!(tile_index(28.0, 9).unwrap(), 0);
        assert_eq!(tile_index(29.0, 9).unwrap(), 1);
        assert_eq!(tile_index(127.5, 9).unwrap(), 4);
    }

    #[test]
    fn test_tile_index_monotonic() {
        let mut previous = 0;
        for step in 0..=2550 {
            let index = tile_index(step as f64 / 10.0, 9).unwrap();
            assert!(index >= previous);
            assert!(index < 9);
            previous = index;
        }
    }

    /// Pixel whose channels add up to `sum` (0..=765)
    fn pixel_with_sum(sum: u32) -> Rgba<u8> {
        let r = sum / 3;
        let g = (sum - r) / 2;
        let b = sum - r - g;
        Rgba([r as u8, g as u8, b as u8, 255])
    }

    #[test]
    fn test_tile_index_exact_boundary() {
        // (198 + 198 + 199) / 3 / 255 * 9 is exactly 7
        let gray = luminance(&Rgba([198, 198, 199, 255]));
        assert_eq!(tile_index(gray, 9).unwrap(), 7);
    }

    #[test]
    fn test_tile_index_every_channel_sum() {
        for sum in 0..=765u32 {
            let pixel = pixel_with_sum(sum);
            let expected = ((sum as f64 / 3.0 / 255.0 * 9.0).floor() as u32).min(8);
            let index = tile_index(luminance(&pixel), 9).unwrap();
            assert_eq!(index, expected, "channel sum {}", sum);
        }
    }

    #[test]
    fn test_tile_index_rejects_out_of_range() {
        assert!(matches!(tile_index(-1.0, 9), Err(TransformError::InvalidInput(_))));
        assert!(matches!(tile_index(256.0, 9), Err(TransformError::InvalidInput(_))));
        assert!(matches!(tile_index(f64::NAN, 9), Err(TransformError::InvalidInput(_))));
    }

    #[test]
    fn test_render_tiles_dimensions() {
        let atlas = numbered_atlas(8, 9);
        let source = RgbaImage::new(5, 3);
        let out = render_tiles(&source, &atlas).unwrap();
        assert_eq!(out.dimensions(), (40, 24));
    }

    #[test]
    fn test_render_tiles_copies_selected_tile() {
        let atlas = numbered_atlas(4, 9);
        let mut source = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        source.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        source.put_pixel(0, 1, Rgba([128, 128, 128, 255]));

        let out = render_tiles(&source, &atlas).unwrap();
        let expected = [(0, 0, 0u8), (1, 0, 8), (0, 1, 4), (1, 1, 0)];
        for (cx, cy, tile) in expected {
            let block = out.view(cx * 4, cy * 4, 4, 4);
            for (_, _, pixel) in block.pixels() {
                assert_eq!(pixel, Rgba([tile, tile, tile, 255]));
            }
        }
    }

    #[test]
    fn test_render_tiles_ignores_alpha() {
        let atlas = numbered_atlas(2, 9);
        let source = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0]));
        let out = render_tiles(&source, &atlas).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([8, 8, 8, 255]));
    }

    #[test]
    fn test_render_tiles_rejects_empty_source() {
        let atlas = numbered_atlas(8, 9);
        let err = render_tiles(&RgbaImage::new(0, 4), &atlas).unwrap_err();
        assert!(matches!(err, TransformError::InvalidDimensions { .. }));
    }
}
