use crate::{
    algorithm::matcher::RegionMatcher,
    analysis::average_color,
    io::error::{Result, computation_error, invalid_parameter},
    io::image::{crop, paste, resize},
    spatial::Region,
};
use image::RgbImage;
use tracing::{debug, trace};

/// How a terminal region was filled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementKind {
    /// Below the size floor, tiled with the closest average color
    Tiled,
    /// Whole candidate accepted under the match threshold
    Matched,
}

/// Record of one terminal region written into the composite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Pixels covered
    pub region: Region,
    /// Number of quadrant splits above this region
    pub depth: usize,
    /// Why recursion stopped here
    pub kind: PlacementKind,
    /// Library index of the pasted candidate
    pub candidate: usize,
    /// Color distance for tiles, mean pixel distance for matches
    pub distance: f64,
}

/// Finished composite together with the placements that produced it
#[derive(Clone, Debug)]
pub struct Composition {
    /// Composite image, same size as the target
    pub image: RgbImage,
    /// Terminal regions in visit order
    pub placements: Vec<Placement>,
}

impl Composition {
    /// Deepest split level reached
    pub fn max_depth(&self) -> usize {
        self.placements.iter().map(|p| p.depth).max().unwrap_or(0)
    }

    /// Number of regions filled by a whole-candidate match
    pub fn matched_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| p.kind == PlacementKind::Matched)
            .count()
    }
}

/// Quadtree walk over the target that fills the composite region by region
///
/// The walk is depth-first in top-left, top-right, bottom-left, bottom-right
/// order, driven by an explicit worklist so very deep trees cannot exhaust
/// the call stack. Each terminal region writes a disjoint rectangle.
pub struct Compositor<'a> {
    target: RgbImage,
    composite: RgbImage,
    matcher: RegionMatcher<'a>,
    min_size: u32,
    threshold: Option<f64>,
    worklist: Vec<(Region, usize)>,
    placements: Vec<Placement>,
    covered_pixels: u64,
}

impl<'a> Compositor<'a> {
    /// Prepare a walk over the whole of `target`
    ///
    /// `threshold` enables the whole-candidate test on non-leaf regions;
    /// `None` always splits until the size floor is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_size` is zero or `threshold` is negative or
    /// not finite
    pub fn new(
        target: RgbImage,
        matcher: RegionMatcher<'a>,
        min_size: u32,
        threshold: Option<f64>,
    ) -> Result<Self> {
        if min_size == 0 {
            return Err(invalid_parameter("min_size", &min_size, &"must be at least 1"));
        }
        if let Some(t) = threshold.filter(|t| !t.is_finite() || *t < 0.0) {
            return Err(invalid_parameter(
                "threshold",
                &t,
                &"must be a finite, non-negative distance",
            ));
        }

        let root = Region::full(target.width(), target.height());
        let worklist = if root.is_empty() {
            Vec::new()
        } else {
            vec![(root, 0)]
        };

        Ok(Self {
            composite: target.clone(),
            target,
            matcher,
            min_size,
            threshold,
            worklist,
            placements: Vec::new(),
            covered_pixels: 0,
        })
    }

    /// Process the next pending region
    ///
    /// Returns whether regions remain to be processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the library is empty or a candidate cannot be
    /// decoded
    pub fn execute_step(&mut self) -> Result<bool> {
        let Some((region, depth)) = self.worklist.pop() else {
            return Ok(false);
        };

        if region.is_leaf(self.min_size) {
            self.tile_leaf(region, depth)?;
        } else if !self.try_whole_match(region, depth)? {
            // Reversed so the top-left quadrant is processed first
            for quadrant in region.quadrants().into_iter().rev() {
                self.worklist.push((quadrant, depth + 1));
            }
        }

        Ok(!self.worklist.is_empty())
    }

    /// Process every remaining region
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::execute_step`]
    pub fn run(&mut self) -> Result<()> {
        while self.execute_step()? {}
        Ok(())
    }

    /// Pixels written so far
    pub const fn covered_pixels(&self) -> u64 {
        self.covered_pixels
    }

    /// Pixels in the whole target
    pub fn total_pixels(&self) -> u64 {
        u64::from(self.target.width()) * u64::from(self.target.height())
    }

    /// Whether every region has been processed
    pub fn is_finished(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Terminal regions placed so far
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Hand back the composite and its placements
    ///
    /// # Errors
    ///
    /// Returns an error if regions are still pending
    pub fn finish(self) -> Result<Composition> {
        if !self.worklist.is_empty() {
            return Err(computation_error(
                "composition",
                &format!("{} regions still pending", self.worklist.len()),
            ));
        }
        Ok(Composition {
            image: self.composite,
            placements: self.placements,
        })
    }

    fn tile_leaf(&mut self, region: Region, depth: usize) -> Result<()> {
        let color = average_color(&crop(&self.target, region))?;
        let found = self.matcher.closest_by_average(&color)?;
        let candidate = self
            .matcher
            .library()
            .get(found.index)
            .ok_or_else(|| computation_error("tiling", &"candidate index out of range"))?;

        let tile = resize(&candidate.open()?, region.width, region.height);
        self.place(region, depth, PlacementKind::Tiled, found.index, found.distance, &tile);
        Ok(())
    }

    fn try_whole_match(&mut self, region: Region, depth: usize) -> Result<bool> {
        let Some(threshold) = self.threshold else {
            return Ok(false);
        };

        let found = self.matcher.closest_by_content(&crop(&self.target, region))?;
        if found.distance >= threshold {
            return Ok(false);
        }

        debug!(%region, candidate = found.index, distance = found.distance, "whole-region match");
        self.place(
            region,
            depth,
            PlacementKind::Matched,
            found.index,
            found.distance,
            &found.image,
        );
        Ok(true)
    }

    fn place(
        &mut self,
        region: Region,
        depth: usize,
        kind: PlacementKind,
        candidate: usize,
        distance: f64,
        tile: &RgbImage,
    ) {
        paste(&mut self.composite, tile, region.x, region.y);
        self.covered_pixels += region.area();
        trace!(%region, depth, ?kind, candidate, distance, "region placed");
        self.placements.push(Placement {
            region,
            depth,
            kind,
            candidate,
            distance,
        });
    }
}
