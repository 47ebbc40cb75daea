/// Basic example: Convert a simple test image to ASCII art
///
/// This draws a gradient with a bright disc and tiles it with the built-in glyph ramp
use ascii_tiler::{GlyphAtlas, TilerConfig, process_image};
use image::{Rgba, RgbaImage};

fn main() {
    println!("ASCII Tiler - Basic Example");
    println!("===========================\n");

    // 640x480 source: 80x60 cells after the 8x shrink
    let width = 640;
    let height = 480;
    let mut img = RgbaImage::new(width, height);

    // Horizontal gradient background
    for y in 0..height {
        for x in 0..width {
            let v = (x * 200 / width) as u8;
            img.put_pixel(x, y, Rgba([v, v, v, 255]));
        }
    }

    // Bright disc in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 150.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            if (dx * dx + dy * dy).sqrt() < radius {
                img.put_pixel(x, y, Rgba([255, 240, 220, 255]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);

    let config = TilerConfig::default();
    let atlas = GlyphAtlas::builtin(config.tile_size, config.tile_count).expect("Built-in atlas");

    println!("Processing with config:");
    println!("  - Tile size: {}", config.tile_size);
    println!("  - Glyphs: {}", config.tile_count);
    println!("  - Downscale factor: {}", config.downscale_factor);
    println!();

    let output = process_image(&img, &atlas, &config).expect("Failed to process image");

    img.save("basic_input.png").expect("Failed to save input");
    output
        .save("basic_output.png")
        .expect("Failed to save output");
    atlas
        .image()
        .save("basic_atlas.png")
        .expect("Failed to save atlas");

    println!("✓ Saved input to:  basic_input.png");
    println!("✓ Saved output to: basic_output.png ({}x{})", output.width(), output.height());
    println!("✓ Saved atlas to:  basic_atlas.png");
}
