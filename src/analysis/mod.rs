//! Color statistics of images and the candidate library built from them

/// Histogram and average-color computation
pub mod average;
/// Candidate library construction from a directory of images
pub mod library;

pub use average::average_color;
pub use library::{Candidate, CandidateLibrary};
