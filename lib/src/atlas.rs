//! Glyph atlas: a single row of equally sized tiles used as a lookup table

use crate::error::{Result, TransformError};
use crate::glyphs::rasterize_ramp;
use image::{GenericImageView, RgbaImage, SubImage};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Read-only glyph atlas holding `tile_count` tiles of `tile_size`×`tile_size`
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    image: RgbaImage,
    tile_size: u32,
    tile_count: u32,
}

impl GlyphAtlas {
    /// Wrap an atlas image, checking it holds exactly `tile_count` tiles in one row
    pub fn from_image(image: RgbaImage, tile_size: u32, tile_count: u32) -> Result<Self> {
        if tile_size == 0 || tile_count == 0 {
            return Err(TransformError::AtlasLoad(format!(
                "tile size and tile count must be positive, got {}x{}",
                tile_size, tile_count
            )));
        }

        let (width, height) = image.dimensions();
        if width != tile_size * tile_count || height != tile_size {
            return Err(TransformError::AtlasLoad(format!(
                "expected a {}x{} atlas for {} tiles of {}px, got {}x{}",
                tile_size * tile_count,
                tile_size,
                tile_count,
                tile_size,
                width,
                height
            )));
        }

        Ok(Self {
            image,
            tile_size,
            tile_count,
        })
    }

    /// Decode an atlas from encoded image bytes
    pub fn decode(bytes: &[u8], tile_size: u32, tile_count: u32) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| TransformError::AtlasLoad(e.to_string()))?
            .to_rgba8();
        Self::from_image(image, tile_size, tile_count)
    }

    /// Load an atlas image from disk
    pub fn open(path: &Path, tile_size: u32, tile_count: u32) -> Result<Self> {
        let image = image::open(path)
            .map_err(|e| TransformError::AtlasLoad(format!("{}: {}", path.display(), e)))?
            .to_rgba8();
        Self::from_image(image, tile_size, tile_count)
    }

    /// Atlas rasterized from the built-in glyph ramp
    pub fn builtin(tile_size: u32, tile_count: u32) -> Result<Self> {
        if tile_size == 0 || tile_count == 0 {
            return Err(TransformError::AtlasLoad(format!(
                "tile size and tile count must be positive, got {}x{}",
                tile_size, tile_count
            )));
        }
        Self::from_image(rasterize_ramp(tile_size, tile_count), tile_size, tile_count)
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn tile_count(&self) -> u32 {
        self.tile_count
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// View of tile `index`
    pub fn tile(&self, index: u32) -> Result<SubImage<&RgbaImage>> {
        if index >= self.tile_count {
            return Err(TransformError::InvalidInput(format!(
                "tile index {} out of range for {} tiles",
                index, self.tile_count
            )));
        }
        Ok(self
            .image
            .view(index * self.tile_size, 0, self.tile_size, self.tile_size))
    }

    /// Raw RGBA bytes of one row of tile `index`
    ///
    /// Callers must pass `index < tile_count` and `row < tile_size`.
    pub(crate) fn tile_row(&self, index: u32, row: u32) -> &[u8] {
        let stride = (self.image.width() * 4) as usize;
        let start = row as usize * stride + (index * self.tile_size * 4) as usize;
        &self.image.as_raw()[start..start + (self.tile_size * 4) as usize]
    }
}

/// Where a `SharedAtlas` gets its pixels from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtlasSource {
    Builtin,
    File(PathBuf),
}

/// Lazily loaded atlas shared by concurrent transforms
///
/// The first successful `get` loads the atlas; later calls hand out the same
/// `Arc`. A failed load leaves nothing behind, so the next call tries again.
#[derive(Debug)]
pub struct SharedAtlas {
    source: AtlasSource,
    tile_size: u32,
    tile_count: u32,
    cell: OnceLock<Arc<GlyphAtlas>>,
}

impl SharedAtlas {
    pub fn new(source: AtlasSource, tile_size: u32, tile_count: u32) -> Self {
        Self {
            source,
            tile_size,
            tile_count,
            cell: OnceLock::new(),
        }
    }

    pub fn builtin(tile_size: u32, tile_count: u32) -> Self {
        Self::new(AtlasSource::Builtin, tile_size, tile_count)
    }

    pub fn source(&self) -> &AtlasSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Shared handle to the atlas, loading it on first use
    pub fn get(&self) -> Result<Arc<GlyphAtlas>> {
        if let Some(atlas) = self.cell.get() {
            return Ok(Arc::clone(atlas));
        }

        debug!("Loading glyph atlas from {:?}", self.source);
        let atlas = match &self.source {
            AtlasSource::Builtin => GlyphAtlas::builtin(self.tile_size, self.tile_count)?,
            AtlasSource::File(path) => GlyphAtlas::open(path, self.tile_size, self.tile_count)?,
        };
        info!(
            "Glyph atlas ready: {} tiles of {}px",
            atlas.tile_count(),
            atlas.tile_size()
        );

        // Another thread may have won the race; everyone shares its copy.
        Ok(Arc::clone(self.cell.get_or_init(|| Arc::new(atlas))))
    }
}
