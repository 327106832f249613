//! Module library: manifest lookup, stack listing and one-call builds

use serde::Serialize;
use stack_fs::{ModuleStore, NormalizedPath};
use std::fs;

use crate::{Bindings, BuildOutput, Error, Manifest, Result, StackBuilder};

/// A module library rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct StackLibrary {
    store: ModuleStore,
}

/// A manifest found in the library's `stacks/` directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSummary {
    pub file: String,
    /// Declared name, `None` if the manifest does not parse
    pub name: Option<String>,
}

impl StackLibrary {
    /// Open the library at `root`, failing if the directory is absent.
    pub fn open(root: impl Into<NormalizedPath>) -> Result<Self> {
        Ok(Self {
            store: ModuleStore::open(root)?,
        })
    }

    pub fn root(&self) -> &NormalizedPath {
        self.store.root()
    }

    pub fn store(&self) -> &ModuleStore {
        &self.store
    }

    /// Resolve a manifest argument to a path.
    ///
    /// Absolute paths and relative paths that exist are used as given;
    /// otherwise the file name is looked up in the library's `stacks/`.
    pub fn resolve_manifest(&self, manifest: &NormalizedPath) -> Result<NormalizedPath> {
        if manifest.is_absolute() || manifest.is_file() {
            return Ok(manifest.clone());
        }
        let candidate = match manifest.file_name() {
            Some(name) => self.store.stacks_dir().join(name),
            None => manifest.clone(),
        };
        if candidate.is_file() {
            tracing::debug!(%candidate, "Resolved manifest in stacks directory");
            Ok(candidate)
        } else {
            Err(Error::ManifestNotFound {
                path: candidate.to_native(),
            })
        }
    }

    /// Load the manifest named by `manifest` and build it.
    pub fn build(&self, manifest: &NormalizedPath, overrides: &Bindings) -> Result<BuildOutput> {
        let path = self.resolve_manifest(manifest)?;
        let manifest = Manifest::load(&path)?;
        StackBuilder::new(&self.store).build(&manifest, overrides)
    }

    /// Manifest files in `stacks/`, sorted by file name.
    pub fn manifest_files(&self) -> Result<Vec<NormalizedPath>> {
        let stacks = self.store.stacks_dir();
        if !stacks.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(stacks.to_native())
            .map_err(|e| stack_fs::Error::io(stacks.to_native(), e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| stack_fs::Error::io(stacks.to_native(), e))?;
            let path = NormalizedPath::new(entry.path());
            let is_manifest = matches!(path.extension(), Some("yaml") | Some("yml"));
            if is_manifest && path.is_file() {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(files)
    }

    /// Every stack in the library with its declared name.
    pub fn list_stacks(&self) -> Result<Vec<StackSummary>> {
        Ok(self
            .manifest_files()?
            .into_iter()
            .map(|path| StackSummary {
                file: path.file_name().unwrap_or_default().to_string(),
                name: Manifest::load(&path).ok().map(|m| m.name),
            })
            .collect())
    }
}
