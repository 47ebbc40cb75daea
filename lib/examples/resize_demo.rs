use ascii_tiler::resize::{downscale_by, fit_within};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

fn main() {
    println!("ASCII Tiler - Resize Demo");
    println!("=========================\n");

    let test_cases = vec![
        (100, 100, "100x100"),
        (127, 85, "127x85 (not multiples of 8)"),
        (1920, 1080, "1920x1080 (Full HD)"),
        (6, 40, "6x40 (too narrow for the 8x shrink)"),
    ];

    for (width, height, description) in test_cases {
        println!("Testing: {}", description);

        let mut img = RgbaImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let gray = ((x + y) % 256) as u8;
                img.put_pixel(x, y, Rgba([gray, gray, gray, 255]));
            }
        }

        match downscale_by(&img, 8, FilterType::Triangle) {
            Ok(small) => println!("  Shrink by 8:    {}x{}", small.width(), small.height()),
            Err(e) => println!("  Shrink by 8:    {}", e),
        }

        match fit_within(&img, 256, 256, FilterType::Triangle) {
            Ok(fitted) => println!("  Fit in 256x256: {}x{}", fitted.width(), fitted.height()),
            Err(e) => println!("  Fit in 256x256: {}", e),
        }
        println!();
    }

    println!("Note: the ASCII path always shrinks by a fixed factor and never upscales.");
}
