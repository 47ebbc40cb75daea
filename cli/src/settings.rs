//! Configuration file handling for ascii-tiler.
//!
//! Loads `ascii-tiler.toml` (or the file given with `--config`) and lays the
//! command-line flags over it.

use crate::args::Args;
use crate::error::CliError;
use ascii_tiler::TilerConfig;
use serde::Deserialize;
use std::path::Path;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub tiler: TilerConfig,
    #[serde(default)]
    pub limits: Limits,
}

/// Upload limits applied before any image reaches the transform.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_files: usize,
    pub max_size_mb: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_size_mb: 5,
        }
    }
}

impl Limits {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Settings {
    /// Load settings from a file path.
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CliError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Overlay command-line flags, then validate the result
    pub fn apply_args(mut self, args: &Args) -> Result<Self, CliError> {
        if let Some(atlas) = &args.atlas {
            self.tiler.atlas_path = Some(atlas.clone());
        }
        if let Some(tile_size) = args.tile_size {
            self.tiler.tile_size = tile_size;
        }
        if let Some(tile_count) = args.tile_count {
            self.tiler.tile_count = tile_count;
        }
        if let Some(factor) = args.downscale {
            self.tiler.downscale_factor = factor;
        }
        if let Some(max_files) = args.max_files {
            self.limits.max_files = max_files;
        }
        if let Some(max_size_mb) = args.max_size_mb {
            self.limits.max_size_mb = max_size_mb;
        }

        self.tiler.validate().map_err(CliError::InvalidConfig)?;
        if self.limits.max_files == 0 {
            return Err(CliError::InvalidConfig(
                "max_files must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_tiler::ResizeFilter;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/ascii-tiler.toml")).unwrap();
        assert_eq!(settings.tiler.tile_size, 8);
        assert_eq!(settings.limits.max_files, 5);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[tiler]\ntile_size = 12\nresize_filter = \"lanczos3\"\n\n[limits]\nmax_size_mb = 20"
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.tiler.tile_size, 12);
        assert_eq!(settings.tiler.tile_count, 9);
        assert_eq!(settings.tiler.resize_filter, ResizeFilter::Lanczos3);
        assert_eq!(settings.limits.max_size_mb, 20);
        assert_eq!(settings.limits.max_files, 5);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tiler\ntile_size = ").unwrap();
        assert!(matches!(
            Settings::load(file.path()),
            Err(CliError::Config { .. })
        ));
    }

    #[test]
    fn test_max_size_bytes_saturates() {
        let limits = Limits {
            max_files: 5,
            max_size_mb: u64::MAX,
        };
        assert_eq!(limits.max_size_bytes(), u64::MAX);
        assert_eq!(Limits::default().max_size_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_flags_override_file() {
        let args = Args::try_parse_from([
            "ascii-tiler",
            "--tile-count",
            "4",
            "--max-files",
            "1",
            "a.png",
        ])
        .unwrap();
        let settings = Settings::default().apply_args(&args).unwrap();
        assert_eq!(settings.tiler.tile_count, 4);
        assert_eq!(settings.limits.max_files, 1);
    }

    #[test]
    fn test_flags_are_validated() {
        let args = Args::try_parse_from(["ascii-tiler", "--tile-size", "0", "a.png"]).unwrap();
        assert!(matches!(
            Settings::default().apply_args(&args),
            Err(CliError::InvalidConfig(_))
        ));
    }
}
