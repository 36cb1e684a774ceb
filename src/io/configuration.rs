//! Mosaic constants and runtime configuration defaults

use image::imageops::FilterType;

// Default values for configurable parameters
/// Default minimum region side before tiling by average color
pub const DEFAULT_MIN_SIZE: u32 = 20;

/// Default average per-pixel distance below which a whole candidate is pasted
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Fixed seed for reproducible tie-breaking in the color cache
pub const DEFAULT_SEED: u64 = 42;

/// Resampling used when fitting candidates to a region
pub const RESIZE_FILTER: FilterType = FilterType::Nearest;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";

/// Extensions accepted as target images in batch mode
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

/// Log filter used when neither `RUST_LOG` nor `--verbose` is given
pub const DEFAULT_LOG_FILTER: &str = "fractomosaic=warn";
