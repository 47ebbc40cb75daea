//! Input selection: the checks an upload form would make before conversion.
//!
//! Files that are not images or are over the size limit are skipped, and
//! only the first `max_files` accepted files are kept.

use crate::error::CliError;
use crate::settings::Limits;
use ascii_tiler::InputImage;
use image::ImageFormat;
use log::warn;
use std::path::{Path, PathBuf};

/// Whether the path names a raster image type
pub fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// Read every acceptable input, in order
pub fn collect_inputs(paths: &[PathBuf], limits: &Limits) -> Result<Vec<InputImage>, CliError> {
    let mut inputs = Vec::new();

    for path in paths {
        if inputs.len() == limits.max_files {
            warn!(
                "Only {} image(s) allowed per run, ignoring '{}' and later files",
                limits.max_files,
                path.display()
            );
            break;
        }

        if !is_image_path(path) {
            warn!("Skipping '{}': not an image", path.display());
            continue;
        }

        let metadata = std::fs::metadata(path).map_err(|e| CliError::Read {
            path: path.clone(),
            source: e,
        })?;
        if metadata.len() > limits.max_size_bytes() {
            warn!(
                "Skipping '{}': {} bytes exceeds the {} MB limit",
                path.display(),
                metadata.len(),
                limits.max_size_mb
            );
            continue;
        }

        let bytes = std::fs::read(path).map_err(|e| CliError::Read {
            path: path.clone(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        inputs.push(InputImage::new(name, bytes));
    }

    if inputs.is_empty() {
        return Err(CliError::NoInputs);
    }
    Ok(inputs)
}
