use crate::{
    algorithm::compositor::{Composition, Compositor},
    algorithm::grayscale::grayscale,
    algorithm::matcher::RegionMatcher,
    analysis::CandidateLibrary,
    io::configuration::{DEFAULT_MIN_SIZE, DEFAULT_SEED, DEFAULT_THRESHOLD},
    io::error::{Result, invalid_parameter},
    io::image::{open_rgb, save},
};
use image::RgbImage;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Mosaic flavours, differing only in how recursion may stop early
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Variant {
    /// Always split down to the size floor
    Basic,
    /// Paste a whole candidate when it matches a region under the threshold
    Fractal,
    /// Fractal plus memoized average-color lookups with random tie-breaks
    #[default]
    Enhanced,
}

impl Variant {
    /// Whether non-leaf regions are tested for a whole-candidate match
    pub const fn uses_content_match(self) -> bool {
        matches!(self, Self::Fractal | Self::Enhanced)
    }

    /// Whether average-color lookups go through the exact-color cache
    pub const fn uses_color_cache(self) -> bool {
        matches!(self, Self::Enhanced)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Basic => "basic",
            Self::Fractal => "fractal",
            Self::Enhanced => "enhanced",
        };
        f.write_str(name)
    }
}

/// Parameters of a single mosaic run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MosaicConfig {
    /// Regions with a side below this many pixels are tiled by average color
    pub min_size: u32,
    /// Mean per-pixel distance under which a whole candidate is accepted
    pub threshold: f64,
    /// Termination heuristics to use
    pub variant: Variant,
    /// Convert the finished composite to gray
    pub grayscale: bool,
    /// Seed for the color cache tie-breaks
    pub seed: u64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            threshold: DEFAULT_THRESHOLD,
            variant: Variant::default(),
            grayscale: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl MosaicConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if `min_size` is zero or `threshold` is negative or
    /// not finite
    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            return Err(invalid_parameter("min_size", &self.min_size, &"must be at least 1"));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(invalid_parameter(
                "threshold",
                &self.threshold,
                &"must be a finite, non-negative distance",
            ));
        }
        Ok(())
    }

    /// Threshold handed to the compositor, `None` when the variant ignores it
    pub fn effective_threshold(&self) -> Option<f64> {
        self.variant.uses_content_match().then_some(self.threshold)
    }
}

/// Prepare a compositor for `target` according to `config`
///
/// # Errors
///
/// Returns an error if `config` is invalid
pub fn compositor_for<'a>(
    library: &'a CandidateLibrary,
    target: RgbImage,
    config: &MosaicConfig,
) -> Result<Compositor<'a>> {
    config.validate()?;
    let matcher = if config.variant.uses_color_cache() {
        RegionMatcher::with_color_cache(library, config.seed)
    } else {
        RegionMatcher::new(library)
    };
    Compositor::new(target, matcher, config.min_size, config.effective_threshold())
}

/// Apply the optional post-pass and log the outcome
pub fn finalize(mut composition: Composition, config: &MosaicConfig) -> Composition {
    if config.grayscale {
        grayscale(&mut composition.image);
    }
    info!(
        variant = %config.variant,
        regions = composition.placements.len(),
        matched = composition.matched_count(),
        depth = composition.max_depth(),
        "mosaic composed"
    );
    composition
}

/// Photomosaic builder owning a candidate library and the latest composite
pub struct Mosaic {
    library: CandidateLibrary,
    composition: Option<Composition>,
}

impl Mosaic {
    /// Build the candidate library from every image in `library_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or any entry fails
    /// to decode
    pub fn new(library_dir: &Path) -> Result<Self> {
        Ok(Self::from_library(CandidateLibrary::from_directory(
            library_dir,
        )?))
    }

    /// Wrap an already built library
    pub const fn from_library(library: CandidateLibrary) -> Self {
        Self {
            library,
            composition: None,
        }
    }

    /// Candidate library in use
    pub const fn library(&self) -> &CandidateLibrary {
        &self.library
    }

    /// Compose a mosaic of the image at `target_path`
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be opened, `config` is invalid,
    /// the library is empty, or a candidate fails to decode
    pub fn create_mosaic(
        &mut self,
        target_path: &Path,
        config: &MosaicConfig,
    ) -> Result<&Composition> {
        let target = open_rgb(target_path)?;
        self.create_mosaic_from_image(target, config)
    }

    /// Compose a mosaic of an already decoded target
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid, the library is empty, or a
    /// candidate fails to decode
    pub fn create_mosaic_from_image(
        &mut self,
        target: RgbImage,
        config: &MosaicConfig,
    ) -> Result<&Composition> {
        let mut compositor = compositor_for(&self.library, target, config)?;
        compositor.run()?;
        let composition = finalize(compositor.finish()?, config);
        Ok(&*self.composition.insert(composition))
    }

    /// Latest composite, if one has been created
    pub fn composition(&self) -> Option<&Composition> {
        self.composition.as_ref()
    }

    /// Write the latest composite to `path`
    ///
    /// Returns `false` without writing when no mosaic has been created yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be encoded or written
    pub fn save_as(&self, path: &Path) -> Result<bool> {
        let Some(composition) = &self.composition else {
            return Ok(false);
        };
        save(&composition.image, path)?;
        info!(path = %path.display(), "mosaic saved");
        Ok(true)
    }
}
