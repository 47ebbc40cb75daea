//! ASCII Tiler - image to glyph-tile ASCII art converter
//!
//! Each pixel of a shrunken source image is replaced by a tile from a glyph
//! atlas, chosen by the pixel's luminance. A plain grayscale filter is
//! provided alongside.
//!
//! # Example
//! ```no_run
//! use ascii_tiler::{GlyphAtlas, TilerConfig, process_image};
//!
//! let input = image::open("photo.jpg").unwrap().to_rgba8();
//! let config = TilerConfig::default();
//! let atlas = GlyphAtlas::builtin(config.tile_size, config.tile_count).unwrap();
//! let output = process_image(&input, &atlas, &config).unwrap();
//! output.save("ascii_art.png").unwrap();
//! ```

pub mod atlas;
pub mod codec;
pub mod config;
pub mod error;
pub mod filters;
pub mod glyphs;
pub mod processor;
pub mod resize;
pub mod tiler;

// Re-export main types for convenience
pub use atlas::{AtlasSource, GlyphAtlas, SharedAtlas};
pub use config::{ResizeFilter, TilerConfig};
pub use error::{Result, TransformError};
pub use processor::{
    Filter, InputImage, ProcessedImage, ascii_art, bw_filter, process_batch, process_image,
    shared_atlas_for,
};
