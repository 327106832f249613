//! Module sources the builder resolves references against

use std::collections::HashMap;
use std::path::PathBuf;

use stack_fs::ModuleStore;

use crate::{Document, ModuleReference, Result};

/// Read-only lookup of module documents.
///
/// `Ok(None)` means the module does not exist and the build skips it with a
/// warning. `Err` is reserved for modules that exist but cannot be read or
/// parsed.
pub trait ModuleSource {
    fn load(&self, reference: &ModuleReference) -> Result<Option<Document>>;

    /// Location of `reference`, for warnings and error messages.
    fn locate(&self, reference: &ModuleReference) -> PathBuf;
}

impl ModuleSource for ModuleStore {
    fn load(&self, reference: &ModuleReference) -> Result<Option<Document>> {
        Ok(ModuleStore::load(self, &reference.category, &reference.filename)?)
    }

    fn locate(&self, reference: &ModuleReference) -> PathBuf {
        self.module_path(&reference.category, &reference.filename)
            .to_native()
    }
}

/// In-memory module source.
///
/// Lets the composition core run without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    modules: HashMap<ModuleReference, Document>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, replacing any previous document at the same reference.
    pub fn insert(&mut self, category: &str, filename: &str, document: Document) {
        self.modules
            .insert(ModuleReference::new(category, filename), document);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, category: &str, filename: &str, document: Document) -> Self {
        self.insert(category, filename, document);
        self
    }
}

impl ModuleSource for MemorySource {
    fn load(&self, reference: &ModuleReference) -> Result<Option<Document>> {
        Ok(self.modules.get(reference).cloned())
    }

    fn locate(&self, reference: &ModuleReference) -> PathBuf {
        PathBuf::from(format!("memory:{reference}"))
    }
}
