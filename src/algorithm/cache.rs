use crate::analysis::CandidateLibrary;
use crate::math::Color;
use std::collections::HashMap;

/// Memoization of average-color lookups keyed by exact color
///
/// Maps a region's average color to the candidates previously found for
/// exactly that color. It is never consulted for approximate matches, so
/// dropping it changes nothing for colors that have not been seen before.
#[derive(Default, Debug)]
pub struct ColorMatchCache {
    /// Color to candidate indices mapping
    matches: HashMap<Color, Vec<usize>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl ColorMatchCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache seeded with every candidate's own average color
    ///
    /// Candidates sharing an identical color end up in the same entry, in
    /// library order.
    pub fn seeded_from(library: &CandidateLibrary) -> Self {
        let mut cache = Self::new();
        for (index, candidate) in library.candidates().iter().enumerate() {
            cache.matches.entry(candidate.color).or_default().push(index);
        }
        cache
    }

    /// Retrieve cached candidates or compute and store the best one
    ///
    /// The closure runs only on a miss; its result becomes the sole entry
    /// for `color`.
    pub fn get_or_compute<F>(&mut self, color: Color, compute_fn: F) -> &[usize]
    where
        F: FnOnce() -> usize,
    {
        use std::collections::hash_map::Entry;

        match self.matches.entry(color) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                entry.insert(vec![compute_fn()])
            }
        }
    }

    /// Candidates recorded for `color`, if any
    pub fn get(&self, color: &Color) -> Option<&[usize]> {
        self.matches.get(color).map(Vec::as_slice)
    }

    /// Number of distinct colors cached
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Forget every cached color
    pub fn clear(&mut self) {
        self.matches.clear();
    }
}
