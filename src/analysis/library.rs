//! Candidate library: every source image in a directory with its average color

use crate::analysis::average::average_color;
use crate::io::error::{MosaicError, Result, file_system};
use crate::io::image::open_rgb;
use crate::math::Color;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One source image available for tiling
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Path the image is reopened from when its pixels are needed
    pub path: PathBuf,
    /// Precomputed average color of the whole image
    pub color: Color,
}

impl Candidate {
    /// Decode the candidate's pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the file has disappeared or no longer decodes
    pub fn open(&self) -> Result<RgbImage> {
        open_rgb(&self.path)
    }
}

/// Candidate images keyed by path, in sorted path order
///
/// Built once and read-only afterwards.
#[derive(Clone, Debug)]
pub struct CandidateLibrary {
    root: PathBuf,
    candidates: Vec<Candidate>,
}

impl CandidateLibrary {
    /// Load every file in `directory` and compute its average color
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or any file in it
    /// cannot be decoded as an image. No partial library is returned.
    pub fn from_directory(directory: &Path) -> Result<Self> {
        Self::from_directory_with_progress(directory, |_, _| {})
    }

    /// Like [`Self::from_directory`], reporting `(loaded, total)` after each image
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or any file in it
    /// cannot be decoded as an image
    pub fn from_directory_with_progress<F>(directory: &Path, mut on_loaded: F) -> Result<Self>
    where
        F: FnMut(usize, usize),
    {
        let paths = list_candidate_paths(directory)?;
        let total = paths.len();
        let mut candidates = Vec::with_capacity(total);

        for path in paths {
            let image = open_rgb(&path)?;
            let color = average_color(&image)?;
            debug!(path = %path.display(), %color, "candidate loaded");
            candidates.push(Candidate { path, color });
            on_loaded(candidates.len(), total);
        }

        info!(
            directory = %directory.display(),
            candidates = candidates.len(),
            "candidate library built"
        );

        Ok(Self {
            root: directory.to_path_buf(),
            candidates,
        })
    }

    /// Assemble a library from already computed candidates
    pub const fn from_candidates(root: PathBuf, candidates: Vec<Candidate>) -> Self {
        Self { root, candidates }
    }

    /// Directory the library was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All candidates in library order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidate at `index`
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the library has no candidates
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Fail unless at least one candidate is available
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyLibrary`] for an empty library
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(MosaicError::EmptyLibrary {
                path: self.root.clone(),
            })
        } else {
            Ok(())
        }
    }
}

/// Every regular file in `directory`, sorted by path
///
/// Subdirectories are skipped; any other entry is expected to be an image.
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn list_candidate_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(directory).map_err(|e| file_system(directory, "list directory", e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| file_system(directory, "read directory entry", e))?
            .path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
