//! Command line, configuration, errors, image I/O, logging and progress display

/// Command-line parsing and per-target processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error type and constructors
pub mod error;
/// Image open, crop, resize, paste and save
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Progress bars for library loading and composition
pub mod progress;
