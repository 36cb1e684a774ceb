//! Rectangular regions of the target image and their quadrant subdivision

/// Region geometry, leaf test and quadrant split
pub mod region;

pub use region::Region;
