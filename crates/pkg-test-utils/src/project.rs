//! [`TestProject`] builder for pkgmeta test scenarios.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary Python project directory with helpers for setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use pkg_test_utils::TestProject;
/// use serde_json::json;
///
/// let project = TestProject::new()
///     .with_metadata(&json!({"name": "demo"}))
///     .with_package("demo");
/// project.assert_file_exists("demo/__init__.py");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Write `pkgmeta.meta` from a JSON object.
    pub fn with_metadata(self, metadata: &Value) -> Self {
        self.write(
            "pkgmeta.meta",
            &serde_json::to_string_pretty(metadata).unwrap(),
        );
        self
    }

    /// Write `pkgmeta.meta` verbatim, e.g. with comment lines.
    pub fn with_raw_metadata(self, content: &str) -> Self {
        self.write("pkgmeta.meta", content);
        self
    }

    /// Create a Python package directory (dotted names nest).
    pub fn with_package(self, dotted: &str) -> Self {
        let relative = format!("{}/__init__.py", dotted.replace('.', "/"));
        self.write(&relative, "");
        self
    }

    /// Create an arbitrary file.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Read a file relative to the project root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(relative).display(),
            content,
            file_content
        );
    }
}
