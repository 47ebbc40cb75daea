//! Built-in glyph ramp
//!
//! The default atlas is rasterized from these 8x8 bitmaps instead of being
//! read from disk, so the ASCII path works without any asset files.

use image::{Rgba, RgbaImage};

/// Side length of the glyph designs below
pub const GLYPH_DESIGN_SIZE: u32 = 8;

/// Glyphs ordered by luminance
///
/// 9 levels from darkest (space) to brightest (@)
pub const GLYPH_RAMP: [char; 9] = [
    ' ',  // 0: darkest
    '.',  // 1
    ':',  // 2
    '-',  // 3
    '=',  // 4
    '+',  // 5
    '*',  // 6
    '#',  // 7
    '@',  // 8: brightest
];

const INK: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PAPER: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Pick `count` glyphs spread evenly over the ramp, darkest first
///
/// With `count == GLYPH_RAMP.len()` this is the ramp itself.
pub fn ramp_for(count: u32) -> Vec<char> {
    let last = (GLYPH_RAMP.len() - 1) as f32;
    let steps = count.saturating_sub(1).max(1) as f32;

    (0..count)
        .map(|i| GLYPH_RAMP[((i as f32 * last / steps).round() as usize).min(GLYPH_RAMP.len() - 1)])
        .collect()
}

/// Rasterize a row of `count` glyph tiles, each `tile_size` pixels square
///
/// The 8x8 designs are scaled with nearest sampling. Ink is opaque white,
/// the background opaque black.
pub fn rasterize_ramp(tile_size: u32, count: u32) -> RgbaImage {
    let glyphs = ramp_for(count);
    let mut atlas = RgbaImage::from_pixel(tile_size * count, tile_size, PAPER);

    for (index, &ch) in glyphs.iter().enumerate() {
        let base_x = index as u32 * tile_size;
        for local_y in 0..tile_size {
            for local_x in 0..tile_size {
                let design_x = local_x * GLYPH_DESIGN_SIZE / tile_size;
                let design_y = local_y * GLYPH_DESIGN_SIZE / tile_size;
                if should_draw_pixel(ch, design_x, design_y) {
                    atlas.put_pixel(base_x + local_x, local_y, INK);
                }
            }
        }
    }

    atlas
}

/// Determine if a pixel should be inked for a glyph at a given position
///
/// # Arguments
/// * `ch` - The glyph
/// * `x` - X position within the 8x8 design (0-7)
/// * `y` - Y position within the 8x8 design (0-7)
fn should_draw_pixel(ch: char, x: u32, y: u32) -> bool {
    match ch {
        ' ' => false,

        '.' => (3..=4).contains(&x) && (6..=7).contains(&y), // Dot on the baseline

        ':' => (3..=4).contains(&x) && (y == 2 || y == 5),

        '-' => y == 3 || y == 4,

        '=' => y == 2 || y == 5,

        '+' => ((x == 3 || x == 4) && (1..=6).contains(&y)) || ((y == 3 || y == 4) && (1..=6).contains(&x)),

        '*' => {
            // Plus with both diagonals, trimmed to the inner 6x6
            let inner = (1..=6).contains(&x) && (1..=6).contains(&y);
            inner && ((x == 3 || x == 4) || (y == 3 || y == 4) || x == y || x == 7 - y)
        }

        '#' => (x == 2 || x == 5) || (y == 2 || y == 5),

        '@' => {
            // Filled disc
            let dx = x as i32 * 2 - 7;
            let dy = y as i32 * 2 - 7;
            dx * dx + dy * dy <= 52
        }

        _ => true,
    }
}
