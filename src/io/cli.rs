//! Command-line interface for building mosaics of one target or a directory of targets

use crate::algorithm::mosaic::{MosaicConfig, Variant, compositor_for, finalize};
use crate::analysis::CandidateLibrary;
use crate::io::configuration::{
    DEFAULT_MIN_SIZE, DEFAULT_SEED, DEFAULT_THRESHOLD, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, file_system, invalid_parameter};
use crate::io::image::{has_image_format, open_rgb, save};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "fractomosaic")]
#[command(
    author,
    version,
    about = "Build quadtree photomosaics from a library of candidate images"
)]
/// Command-line arguments for the mosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Target image (any decodable format), or directory of target images
    /// (files with a known image extension)
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of candidate images to build the mosaic from
    #[arg(short, long, value_name = "DIR")]
    pub library: PathBuf,

    /// Output path (single target only; defaults to <target>_mosaic.<ext>)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Regions with a side below this many pixels are tiled by average color
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MIN_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub min_size: u32,

    /// Mean per-pixel color distance under which a whole candidate replaces a region
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, value_parser = parse_threshold)]
    pub threshold: f64,

    /// Mosaic variant
    #[arg(long, value_enum, default_value_t = Variant::Enhanced)]
    pub variant: Variant,

    /// Convert the finished mosaic to grayscale
    #[arg(short, long)]
    pub grayscale: bool,

    /// Random seed for reproducible tie-breaking
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process targets even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_threshold(value: &str) -> std::result::Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|e| format!("`{value}` is not a number: {e}"))?;
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(format!("`{value}` must be a finite, non-negative distance"))
    }
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Mosaic parameters selected on the command line
    pub const fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            min_size: self.min_size,
            threshold: self.threshold,
            variant: self.variant,
            grayscale: self.grayscale,
            seed: self.seed,
        }
    }
}

/// Orchestrates library construction and per-target mosaic generation
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process targets according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, library construction or
    /// mosaic generation fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.mosaic_config();
        config.validate()?;

        if self.cli.output.is_some() && self.cli.target.is_dir() {
            return Err(invalid_parameter(
                "output",
                &self.cli.target.display(),
                &"an explicit output path requires a single target image",
            ));
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        let library = self.build_library()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&library, &config, file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn build_library(&mut self) -> Result<CandidateLibrary> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_library(0);
        }

        let progress = self.progress_manager.as_ref();
        let library =
            CandidateLibrary::from_directory_with_progress(&self.cli.library, |loaded, total| {
                if let Some(pm) = progress {
                    pm.update_library(loaded, total);
                }
            })?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish_library();
        }
        if library.is_empty() {
            warn!(directory = %self.cli.library.display(), "candidate library is empty");
        }
        Ok(library)
    }

    /// Targets to process, sorted, with already produced outputs skipped
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither an image file nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) || has_image_format(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file is not a decodable image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let entries = std::fs::read_dir(&self.cli.target)
                .map_err(|e| file_system(&self.cli.target, "list directory", e))?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system(&self.cli.target, "read directory entry", e))?
                    .path();
                if is_supported_image(&path)
                    && !is_mosaic_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path_for(input_path);
        if output_path.exists() {
            info!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        library: &CandidateLibrary,
        config: &MosaicConfig,
        input_path: &Path,
        index: usize,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path_for(input_path);

        let target = open_rgb(input_path)?;
        let mut compositor = compositor_for(library, target, config)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, compositor.total_pixels());
        }

        while compositor.execute_step()? {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_coverage(index, compositor.covered_pixels());
            }
        }

        let composition = finalize(compositor.finish()?, config);
        save(&composition.image, &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "mosaic written"
        );
        Ok(())
    }

    /// Where the mosaic of `input_path` is written
    pub fn output_path_for(&self, input_path: &Path) -> PathBuf {
        self.cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(input_path))
    }
}

/// `<stem>_mosaic.<ext>` next to the input
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Whether the extension names a supported image format
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_mosaic_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
