use crate::atlas::{AtlasSource, GlyphAtlas, SharedAtlas};
use crate::codec::{decode, encode, output_file_name};
use crate::config::TilerConfig;
use crate::error::{Result, TransformError};
use crate::filters::grayscale;
use crate::resize::downscale_by;
use crate::tiler::render_tiles;
use image::{ImageFormat, RgbaImage};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::Arc;

/// Which transform to apply to a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Shrink, then replace each pixel with a glyph tile; always written as PNG
    #[default]
    Ascii,
    /// Full grayscale at native resolution, written in the source format
    Grayscale,
}

/// One user-supplied image: its file name and raw bytes
#[derive(Debug, Clone)]
pub struct InputImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Encoded result for one input image
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub file_name: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Converts a decoded image to ASCII art
///
/// Pipeline:
/// 1. Shrink the source by `downscale_factor` along each axis
/// 2. Pick an atlas tile per remaining pixel by its luminance
/// 3. Blit the tiles into an output `tile_size` times larger
///
/// # Arguments
/// * `input` - The decoded source image
/// * `atlas` - Glyph atlas to draw tiles from
/// * `config` - Tiling configuration
///
/// # Returns
/// The tiled RGBA image, or `InvalidConfig` if the atlas layout differs from
/// the configured tile size and count
pub fn process_image(input: &RgbaImage, atlas: &GlyphAtlas, config: &TilerConfig) -> Result<RgbaImage> {
    config.validate().map_err(TransformError::InvalidConfig)?;
    if atlas.tile_size() != config.tile_size || atlas.tile_count() != config.tile_count {
        return Err(TransformError::InvalidConfig(format!(
            "atlas has {} tiles of {}px, config expects {} tiles of {}px",
            atlas.tile_count(),
            atlas.tile_size(),
            config.tile_count,
            config.tile_size
        )));
    }

    let working_image = downscale_by(input, config.downscale_factor, config.resize_filter.filter_type())?;
    render_tiles(&working_image, atlas)
}

/// Decodes, tiles and encodes one image as PNG
///
/// The output keeps the input's name with a `.png` extension.
pub fn ascii_art(input: &InputImage, atlas: &GlyphAtlas, config: &TilerConfig) -> Result<ProcessedImage> {
    let (image, _) = decode(&input.bytes)?;
    let output = process_image(&image, atlas, config)?;
    let bytes = encode(&output, ImageFormat::Png)?;

    debug!(
        "ASCII art for '{}': {}x{} -> {}x{}",
        input.name,
        image.width(),
        image.height(),
        output.width(),
        output.height()
    );

    Ok(ProcessedImage {
        file_name: output_file_name(&input.name, ImageFormat::Png),
        format: ImageFormat::Png,
        width: output.width(),
        height: output.height(),
        bytes,
    })
}

/// Decodes, grays and re-encodes one image in its original format and name
pub fn bw_filter(input: &InputImage) -> Result<ProcessedImage> {
    let (image, format) = decode(&input.bytes)?;
    let output = grayscale(&image)?;
    let bytes = encode(&output, format)?;

    debug!("Grayscale for '{}': {}x{} {:?}", input.name, output.width(), output.height(), format);

    Ok(ProcessedImage {
        file_name: input.name.clone(),
        format,
        width: output.width(),
        height: output.height(),
        bytes,
    })
}

/// Processes every input independently on the rayon pool
///
/// Result `i` always belongs to input `i`, and one failing image never stops
/// the others. The atlas is only loaded for the ASCII filter; if it cannot be
/// loaded every ASCII result carries that `AtlasLoad` error.
pub fn process_batch(
    inputs: &[InputImage],
    filter: Filter,
    atlas: &SharedAtlas,
    config: &TilerConfig,
) -> Vec<Result<ProcessedImage>> {
    info!("Processing {} image(s) with {:?} filter", inputs.len(), filter);

    let results: Vec<Result<ProcessedImage>> = match filter {
        Filter::Ascii => match atlas.get() {
            Ok(atlas) => inputs
                .par_iter()
                .map(|input| ascii_art(input, &atlas, config))
                .collect(),
            Err(e) => {
                let message = match e {
                    TransformError::AtlasLoad(message) => message,
                    other => other.to_string(),
                };
                inputs
                    .iter()
                    .map(|_| Err(TransformError::AtlasLoad(message.clone())))
                    .collect()
            }
        },
        Filter::Grayscale => inputs.par_iter().map(bw_filter).collect(),
    };

    for (input, result) in inputs.iter().zip(&results) {
        if let Err(e) = result {
            warn!("Failed to process '{}': {}", input.name, e);
        }
    }

    results
}

/// Atlas described by `config`: its file if set, the built-in ramp otherwise
pub fn shared_atlas_for(config: &TilerConfig) -> Arc<SharedAtlas> {
    let source = match &config.atlas_path {
        Some(path) => AtlasSource::File(path.clone()),
        None => AtlasSource::Builtin,
    };
    Arc::new(SharedAtlas::new(source, config.tile_size, config.tile_count))
}
