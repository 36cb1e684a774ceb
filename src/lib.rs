//! Quadtree photomosaic builder
//!
//! A target image is split recursively into quadrants. Each region is either
//! replaced by a whole library image that matches it closely enough, or,
//! once it falls below a size floor, tiled with the library image whose
//! average color is nearest.

#![forbid(unsafe_code)]

/// Region matching, the compositor walk and the mosaic variants
pub mod algorithm;
/// Average colors and the candidate library
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Color type and distance metric
pub mod math;
/// Region geometry and quadrant subdivision
pub mod spatial;

pub use algorithm::mosaic::{Mosaic, MosaicConfig, Variant};
pub use io::error::{MosaicError, Result};
