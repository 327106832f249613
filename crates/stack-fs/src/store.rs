//! Read-only access to a categorized module library

use crate::document::{DocumentFormat, parse_document};
use crate::{Error, LibraryPath, NormalizedPath, Result, io};
use serde_json::Value;

/// Filesystem-backed module store.
///
/// Modules live at `<root>/<category>/<filename>`. A module that is not
/// on disk is reported as `Ok(None)` so callers can skip it; a module that
/// exists but does not parse is an error naming the file.
#[derive(Debug, Clone)]
pub struct ModuleStore {
    root: NormalizedPath,
}

impl ModuleStore {
    /// Create a store over `root` without checking that it exists.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store, failing if `root` is not a directory.
    pub fn open(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::LibraryNotFound {
                path: root.to_native(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Path a module reference resolves to.
    pub fn module_path(&self, category: &str, filename: &str) -> NormalizedPath {
        self.root.join(category).join(filename)
    }

    /// Directory holding stack manifests.
    pub fn stacks_dir(&self) -> NormalizedPath {
        self.root.join(LibraryPath::StacksDir.as_str())
    }

    /// Load a module document.
    pub fn load(&self, category: &str, filename: &str) -> Result<Option<Value>> {
        let path = self.module_path(category, filename);
        let Some(content) = io::read_text_if_exists(&path)? else {
            tracing::debug!(%path, "Module not present in library");
            return Ok(None);
        };

        tracing::debug!(%path, "Loading module");
        parse_document(&content, DocumentFormat::from_path(&path), &path).map(Some)
    }
}
