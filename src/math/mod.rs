//! Numeric primitives shared by matching and compositing

/// RGB color type and distance metric
pub mod color;

pub use color::Color;
