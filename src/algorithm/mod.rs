/// Exact-color memoization for average-color lookups
pub mod cache;
/// Quadtree walk that fills the composite region by region
pub mod compositor;
/// Unweighted grayscale post-pass
pub mod grayscale;
/// Candidate lookup by average color and by pixel content
pub mod matcher;
/// Variants, run configuration and the mosaic builder
pub mod mosaic;
