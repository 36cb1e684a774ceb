//! Candidate lookup for a region, by average color or by full pixel content

use crate::algorithm::cache::ColorMatchCache;
use crate::analysis::{Candidate, CandidateLibrary};
use crate::io::error::{MosaicError, Result, computation_error};
use crate::io::image::resize;
use crate::math::Color;
use image::RgbImage;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::debug;

/// Candidate chosen for a region's average color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AverageMatch {
    /// Index of the candidate in the library
    pub index: usize,
    /// Distance between the region color and the candidate color
    pub distance: f64,
}

/// Candidate whose pixels best reproduce a region
#[derive(Clone, Debug)]
pub struct ContentMatch {
    /// Index of the candidate in the library
    pub index: usize,
    /// Candidate resized to the region, ready to paste
    pub image: RgbImage,
    /// Mean per-pixel distance to the region
    pub distance: f64,
}

/// Nearest candidate to `color` by linear scan
///
/// Ties keep the first candidate in library order. Returns `None` for an
/// empty library.
pub fn nearest_by_color(candidates: &[Candidate], color: &Color) -> Option<AverageMatch> {
    let mut best: Option<AverageMatch> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let distance = color.distance(&candidate.color);
        if best.is_none_or(|current| distance < current.distance) {
            best = Some(AverageMatch { index, distance });
        }
    }
    best
}

/// Mean Euclidean distance between pixels at matching coordinates
///
/// # Errors
///
/// Returns an error if the images differ in size or are empty
pub fn mean_pixel_distance(region: &RgbImage, candidate: &RgbImage) -> Result<f64> {
    if region.dimensions() != candidate.dimensions() {
        return Err(computation_error(
            "pixel distance",
            &format!(
                "size mismatch {:?} vs {:?}",
                region.dimensions(),
                candidate.dimensions()
            ),
        ));
    }
    let pixel_count = u64::from(region.width()) * u64::from(region.height());
    if pixel_count == 0 {
        return Err(computation_error("pixel distance", &"region has no pixels"));
    }

    let total: f64 = region
        .pixels()
        .zip(candidate.pixels())
        .map(|(&a, &b)| Color::from(a).distance(&Color::from(b)))
        .sum();
    Ok(total / pixel_count as f64)
}

/// Finds library candidates for regions of the target image
///
/// The optional exact-color cache and the random source used to break its
/// ties are owned here, so a fixed seed reproduces a run exactly.
pub struct RegionMatcher<'a> {
    library: &'a CandidateLibrary,
    cache: Option<ColorMatchCache>,
    rng: StdRng,
}

impl<'a> RegionMatcher<'a> {
    /// Matcher performing a full scan on every lookup
    pub fn new(library: &'a CandidateLibrary) -> Self {
        Self {
            library,
            cache: None,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Matcher that memoizes exact colors, breaking ties with `seed`
    pub fn with_color_cache(library: &'a CandidateLibrary, seed: u64) -> Self {
        Self {
            library,
            cache: Some(ColorMatchCache::seeded_from(library)),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Library being matched against
    pub const fn library(&self) -> &'a CandidateLibrary {
        self.library
    }

    /// Exact-color cache, when enabled
    pub const fn cache(&self) -> Option<&ColorMatchCache> {
        self.cache.as_ref()
    }

    /// Closest candidate to `color` by average color
    ///
    /// With the cache enabled, a color seen before returns a uniformly
    /// random pick among the candidates recorded for it; a new color is
    /// resolved by full scan and its winner recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the library is empty
    pub fn closest_by_average(&mut self, color: &Color) -> Result<AverageMatch> {
        let library = self.library;
        library.ensure_not_empty()?;
        let candidates = library.candidates();

        let Some(cache) = self.cache.as_mut() else {
            return nearest_by_color(candidates, color).ok_or_else(|| empty_library(library));
        };

        let misses_before = cache.stats.misses;
        let index = cache
            .get_or_compute(*color, || {
                nearest_by_color(candidates, color).map_or(0, |found| found.index)
            })
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(0);
        if cache.stats.misses > misses_before {
            debug!(%color, index, "color cache miss, scanned library");
        } else {
            debug!(%color, index, "color cache hit");
        }

        let candidate = library.get(index).ok_or_else(|| {
            computation_error("color cache", &format!("stale candidate index {index}"))
        })?;
        Ok(AverageMatch {
            index,
            distance: color.distance(&candidate.color),
        })
    }

    /// Candidate whose resized pixels are closest to `region`
    ///
    /// Every candidate is reopened and resized to the region's exact size;
    /// the lowest mean per-pixel distance wins, ties keeping library order.
    ///
    /// # Errors
    ///
    /// Returns an error if the library is empty or any candidate fails to decode
    pub fn closest_by_content(&self, region: &RgbImage) -> Result<ContentMatch> {
        self.library.ensure_not_empty()?;
        let (width, height) = region.dimensions();

        let mut best: Option<ContentMatch> = None;
        for (index, candidate) in self.library.candidates().iter().enumerate() {
            let resized = resize(&candidate.open()?, width, height);
            let distance = mean_pixel_distance(region, &resized)?;
            if best.as_ref().is_none_or(|current| distance < current.distance) {
                best = Some(ContentMatch {
                    index,
                    image: resized,
                    distance,
                });
            }
        }

        best.ok_or_else(|| empty_library(self.library))
    }
}

fn empty_library(library: &CandidateLibrary) -> MosaicError {
    MosaicError::EmptyLibrary {
        path: library.root().to_path_buf(),
    }
}
