use image::imageops::FilterType;
use serde::Deserialize;
use std::path::PathBuf;

/// Resampling filter used when shrinking the source before tiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl ResizeFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Configuration for the ASCII tiling path
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TilerConfig {
    /// Rendering
    pub tile_size: u32,          // pixels per tile side, default 8
    pub tile_count: u32,         // glyphs in the atlas (N), default 9

    /// Resizing
    pub downscale_factor: u32,   // source shrink factor per axis, default 8
    pub resize_filter: ResizeFilter,

    /// Atlas image on disk; None uses the built-in ramp
    pub atlas_path: Option<PathBuf>,
}

impl Default for TilerConfig {
    fn default() -> Self {
        Self {
            tile_size: 8,
            tile_count: 9,

            downscale_factor: 8,
            resize_filter: ResizeFilter::default(),

            atlas_path: None,
        }
    }
}

impl TilerConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size < 1 || self.tile_size > 64 {
            return Err(format!("tile_size must be between 1 and 64, got {}", self.tile_size));
        }
        if self.tile_count < 2 || self.tile_count > 64 {
            return Err(format!("tile_count must be between 2 and 64, got {}", self.tile_count));
        }
        if self.downscale_factor < 1 || self.downscale_factor > 64 {
            return Err(format!(
                "downscale_factor must be between 1 and 64, got {}",
                self.downscale_factor
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TilerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tile_size, 8);
        assert_eq!(config.tile_count, 9);
        assert_eq!(config.downscale_factor, 8);
    }

    #[test]
    fn test_invalid_tile_size() {
        let mut config = TilerConfig::default();
        config.tile_size = 0;
        assert!(config.validate().is_err());

        config.tile_size = 65;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_tile_count() {
        let mut config = TilerConfig::default();
        config.tile_count = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_downscale_factor() {
        let config = TilerConfig {
            downscale_factor: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bilinear_maps_to_triangle() {
        assert_eq!(ResizeFilter::Bilinear.filter_type(), FilterType::Triangle);
        assert_eq!(ResizeFilter::default(), ResizeFilter::Bilinear);
    }
}
