//! [`TestLibrary`] builder for module library scenarios.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directories a complete library carries.
const LIBRARY_DIRS: [&str; 5] = ["core", "settings", "extensions", "tasks", "stacks"];

/// A temporary module library with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use stack_test_utils::TestLibrary;
/// use serde_json::json;
///
/// let library = TestLibrary::new();
/// library.module("core", "base.json", &json!({"editor.tabSize": 4}));
/// library.manifest("dev.yaml", "name: Dev\nmodules:\n  core: [base.json]\n");
/// library.assert_file_exists("core/base.json");
/// ```
pub struct TestLibrary {
    temp_dir: TempDir,
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLibrary {
    /// Create a library with the standard directory layout.
    pub fn new() -> Self {
        let library = Self::empty();
        for dir in LIBRARY_DIRS {
            fs::create_dir_all(library.root().join(dir)).unwrap();
        }
        library
    }

    /// Create an empty temporary directory with no layout.
    pub fn empty() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `stacks/<file>`.
    pub fn manifest_path(&self, file: &str) -> PathBuf {
        self.root().join("stacks").join(file)
    }

    /// A fresh output directory inside the library's temp dir.
    pub fn output_dir(&self) -> PathBuf {
        self.root().join("out")
    }

    /// Write a JSON module to `<category>/<file>`.
    pub fn module(&self, category: &str, file: &str, document: &Value) -> PathBuf {
        let text = serde_json::to_string_pretty(document).unwrap();
        self.raw_module(category, file, &text)
    }

    /// Write raw module text, for malformed-document scenarios.
    pub fn raw_module(&self, category: &str, file: &str, text: &str) -> PathBuf {
        let dir = self.root().join(category);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, text).unwrap();
        path
    }

    /// Write a manifest to `stacks/<file>`.
    pub fn manifest(&self, file: &str, yaml: &str) -> PathBuf {
        let path = self.manifest_path(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, yaml).unwrap();
        path
    }

    /// Parse the JSON file at `path` (relative to root).
    ///
    /// # Panics
    /// Panics if the file cannot be read or is not valid JSON.
    pub fn read_json(&self, path: &str) -> Value {
        let full_path = self.root().join(path);
        let text = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", full_path.display(), e))
    }

    /// Assert that `path` (relative to root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
