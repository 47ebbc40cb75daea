mod args;
mod error;
mod settings;
mod upload;

use args::Args;
use ascii_tiler::{ProcessedImage, process_batch, shared_atlas_for};
use clap::Parser;
use error::CliError;
use log::{error, info};
use settings::Settings;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    // Configure logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!("{} image(s) failed", failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Convert every accepted input, returning how many failed
fn run(args: &Args) -> Result<usize, CliError> {
    let settings = Settings::load(&args.config)?.apply_args(args)?;
    let inputs = upload::collect_inputs(&args.inputs, &settings.limits)?;

    let atlas = shared_atlas_for(&settings.tiler);
    let start = Instant::now();
    let results = process_batch(&inputs, args.filter.into(), &atlas, &settings.tiler);
    info!(
        "Processed {} image(s) in {:.1} ms",
        inputs.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    std::fs::create_dir_all(&args.out_dir).map_err(|e| CliError::Write {
        path: args.out_dir.clone(),
        source: e,
    })?;

    let mut writer = OutputWriter::new(&args.out_dir, &args.inputs);
    let mut failed = 0;
    for result in results {
        match result {
            Ok(processed) => {
                if let Err(e) = writer.save(&processed) {
                    error!("{}", e);
                    failed += 1;
                }
            }
            // Already logged per image by the batch
            Err(_) => failed += 1,
        }
    }
    Ok(failed)
}

/// Writes results into the output directory without clobbering inputs or
/// earlier outputs of the same run
struct OutputWriter {
    out_dir: PathBuf,
    protected: HashSet<PathBuf>,
    written: HashSet<PathBuf>,
}

impl OutputWriter {
    fn new(out_dir: &Path, inputs: &[PathBuf]) -> Self {
        Self {
            out_dir: out_dir.to_path_buf(),
            protected: inputs.iter().filter_map(|p| p.canonicalize().ok()).collect(),
            written: HashSet::new(),
        }
    }

    fn save(&mut self, processed: &ProcessedImage) -> Result<PathBuf, CliError> {
        let path = self.out_dir.join(&processed.file_name);
        let key = self
            .out_dir
            .canonicalize()
            .map(|dir| dir.join(&processed.file_name))
            .unwrap_or_else(|_| path.clone());

        if self.protected.contains(&key) || self.written.contains(&key) {
            return Err(CliError::WouldOverwrite { path });
        }

        std::fs::write(&path, &processed.bytes).map_err(|e| CliError::Write {
            path: path.clone(),
            source: e,
        })?;
        self.written.insert(key);

        info!(
            "✓ Saved {} ({}x{})",
            path.display(),
            processed.width,
            processed.height
        );
        Ok(path)
    }
}
