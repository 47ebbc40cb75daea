use ascii_tiler::Filter;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Turn images into glyph-tile ASCII art or plain grayscale
#[derive(Parser, Debug)]
#[command(name = "ascii-tiler", version, about)]
pub struct Args {
    /// Images to convert (JPEG, PNG, WebP, ...)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Transform to apply
    #[arg(short, long, value_enum, default_value_t = FilterArg::Ascii)]
    pub filter: FilterArg,

    /// Directory to write results into
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Glyph atlas image (one row of square tiles); built-in ramp if omitted
    #[arg(long)]
    pub atlas: Option<PathBuf>,

    /// Tile side length in pixels
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Number of tiles in the atlas
    #[arg(long)]
    pub tile_count: Option<u32>,

    /// Shrink factor applied to the source before tiling
    #[arg(long)]
    pub downscale: Option<u32>,

    /// TOML config file
    #[arg(short, long, default_value = "ascii-tiler.toml")]
    pub config: PathBuf,

    /// Maximum number of images accepted per run
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Maximum size of a single image in MB
    #[arg(long)]
    pub max_size_mb: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    Ascii,
    Grayscale,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Ascii => Filter::Ascii,
            FilterArg::Grayscale => Filter::Grayscale,
        }
    }
}
