//! Keeps the test tree in step with the source tree
//!
//! Every source file has a unit test file at the same relative path under
//! `tests/unit`, each unit test file imports the module it mirrors, and
//! every test file defines at least one `#[test]`.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";
    const CRATE_NAME: &str = "fractomosaic";

    /// Files that only declare modules or start the binary
    const EXEMPT_FILES: &[&str] = &["lib.rs", "main.rs", "mod.rs"];

    /// Package keys expected in `Cargo.toml`
    const MANIFEST_KEYS: &[&str] = &[
        "authors",
        "description",
        "homepage",
        "repository",
        "documentation",
        "license",
        "readme",
        "keywords",
        "categories",
    ];

    /// Crate-level test files that must exist besides the unit tree
    const REQUIRED_TEST_FILES: &[&str] = &["tests/mosaic.rs", "tests/meta/coverage.rs"];

    fn is_exempt(relative: &Path) -> bool {
        relative
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| EXEMPT_FILES.contains(&name))
    }

    /// Every `.rs` file under `dir`, relative to `dir`, sorted
    fn rust_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path
                        .strip_prefix(dir)
                        .map_err(|_stripped| io::Error::other("path outside scanned directory"))?;
                    files.push(relative.to_path_buf());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    /// `io/cli.rs` -> `fractomosaic::io::cli`
    fn module_path(relative: &Path) -> String {
        let segments: Vec<String> = relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        format!("{CRATE_NAME}::{}", segments.join("::"))
    }

    fn report(header: &str, lines: &[String]) -> String {
        format!("{header}:\n{}", lines.join("\n"))
    }

    // Tests every non-exempt source file has a unit test counterpart
    // Verified by deleting tests/unit/io/logging.rs
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = rust_files(Path::new(SRC_DIR)).unwrap();
        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_exempt(path))
            .filter(|path| !Path::new(UNIT_DIR).join(path).exists())
            .map(|path| format!("  - src/{0} -> tests/unit/{0}", path.display()))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without unit tests", &missing)
        );
    }

    // Tests no unit test file outlives its source file
    // Verified by adding tests/unit/spatial/grid.rs with no src counterpart
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let unit = rust_files(Path::new(UNIT_DIR)).unwrap();
        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !is_exempt(path))
            .filter(|path| !Path::new(SRC_DIR).join(path).exists())
            .map(|path| format!("  - tests/unit/{} (no source file)", path.display()))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit test files without source files", &orphaned)
        );
    }

    // Tests each unit test file imports the module it is named after
    // Verified by importing Region through the spatial re-export
    #[test]
    fn test_unit_tests_import_their_module() {
        let unit = rust_files(Path::new(UNIT_DIR)).unwrap();
        let mut mismatched = Vec::new();
        for path in unit.iter().filter(|path| !is_exempt(path)) {
            let content = fs::read_to_string(Path::new(UNIT_DIR).join(path)).unwrap();
            let module = module_path(path);
            if !content.contains(&module) {
                mismatched.push(format!("  - tests/unit/{} never uses {module}", path.display()));
            }
        }

        assert!(
            mismatched.is_empty(),
            "{}",
            report("Unit test files not exercising their module", &mismatched)
        );
    }

    // Tests every test file outside module declarations defines a test
    // Verified by emptying tests/mosaic.rs
    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_files(Path::new(TESTS_DIR)).unwrap();
        let mut without_tests = Vec::new();
        for path in files.iter().filter(|path| !is_exempt(path)) {
            let content = fs::read_to_string(Path::new(TESTS_DIR).join(path)).unwrap();
            if !content.contains("#[test]") {
                without_tests.push(format!("  - tests/{}", path.display()));
            }
        }

        assert!(
            without_tests.is_empty(),
            "{}",
            report("Test files without #[test] functions", &without_tests)
        );
    }

    // Tests the end-to-end and meta test targets are present
    // Verified by renaming tests/mosaic.rs
    #[test]
    fn test_required_test_files_exist() {
        let missing: Vec<String> = REQUIRED_TEST_FILES
            .iter()
            .filter(|path| !Path::new(path).exists())
            .map(|path| format!("  - {path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Required test files missing", &missing)
        );
    }

    // Tests the manifest carries the metadata published crates need
    // Verified by removing the repository key from Cargo.toml
    #[test]
    fn test_manifest_metadata() {
        let manifest = fs::read_to_string("Cargo.toml").unwrap();
        let missing: Vec<String> = MANIFEST_KEYS
            .iter()
            .filter(|key| !manifest.lines().any(|line| line.starts_with(&format!("{key} = "))))
            .map(|key| format!("  - {key}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Cargo.toml is missing package keys", &missing)
        );
    }

    // Tests module paths are derived from nested file paths
    // Verified by keeping the .rs extension in the path
    #[test]
    fn test_module_path() {
        assert_eq!(module_path(Path::new("io/cli.rs")), "fractomosaic::io::cli");
        assert_eq!(
            module_path(Path::new("algorithm/compositor.rs")),
            "fractomosaic::algorithm::compositor"
        );
        assert!(is_exempt(Path::new("algorithm/mod.rs")));
        assert!(!is_exempt(Path::new("io/logging.rs")));
    }
}
