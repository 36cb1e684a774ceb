//! Library loading and per-target coverage progress with batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for a mosaic run
///
/// One bar tracks candidate loading. Each target then gets a bar tracking
/// how many of its pixels have been covered; large batches switch to a
/// single batch bar plus a rolling window of the most recent targets.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    library_bar: Option<ProgressBar>,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    /// Stores (`filename`, `covered_pixels`, `total_pixels`) for rolling window display
    file_states: Vec<(String, u64, u64)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static LIBRARY_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Candidates: [{bar:40.green/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Targets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            library_bar: None,
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
            file_states: Vec::new(),
        }
    }

    /// Show a bar for loading `candidate_count` library images
    pub fn start_library(&mut self, candidate_count: usize) {
        let bar = ProgressBar::new(candidate_count as u64);
        bar.set_style(LIBRARY_STYLE.clone());
        self.library_bar = Some(self.multi_progress.add(bar));
    }

    /// Report how many library images have been loaded
    pub fn update_library(&self, loaded: usize, total: usize) {
        if let Some(ref bar) = self.library_bar {
            bar.set_length(total as u64);
            bar.set_position(loaded as u64);
        }
    }

    /// Remove the library bar once loading is complete
    pub fn finish_library(&mut self) {
        if let Some(bar) = self.library_bar.take() {
            bar.finish_and_clear();
            self.multi_progress.remove(&bar);
        }
    }

    /// Initialize progress bars based on target count
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        // Switch to batch mode for large target sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of targets the manager was initialized for
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Whether the batch bar is in use
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }

    /// Configure progress bar for a new target
    pub fn start_file(&mut self, index: usize, path: &Path, total_pixels: u64) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, total_pixels);
        }
        self.update_bars();
    }

    /// Report how many pixels of a target have been covered
    pub fn update_coverage(&mut self, file_index: usize, covered_pixels: u64) {
        if let Some(state) = self.file_states.get_mut(file_index) {
            state.1 = covered_pixels;
        }
        self.update_bars();
    }

    /// Mark target as completed and update batch progress
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All targets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active targets
    fn update_bars(&self) {
        let active_files: Vec<_> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, covered, total)) in visible_files.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(*total);
                bar.set_position(*covered);
                let percent = if *total == 0 {
                    100
                } else {
                    covered.saturating_mul(100) / total
                };
                bar.set_message(format!("{percent:>3}%"));
                bar.set_prefix(name.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible_files.len()..self.file_bars.len() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
