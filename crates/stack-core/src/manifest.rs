//! Stack manifest parsing
//!
//! A manifest names a stack, declares placeholder bindings and lists the
//! modules to compose per category:
//!
//! ```yaml
//! name: Python Dev
//! variables:
//!   VENV: /opt/venv
//! modules:
//!   core: [base.json]
//!   settings: [python.json, formatting.json]
//!   extensions: [python.json]
//!   tasks: [pytest.json]
//! ```
//!
//! Category order and module order within a category are both preserved;
//! they are the fold order of the build.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stack_fs::{ArtifactFile, NormalizedPath, io};
use std::path::PathBuf;

use crate::variables::{Bindings, apply_overrides};
use crate::{Error, Result};

/// Category names the module library recognizes.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "core",
    "settings",
    "extensions",
    "tasks",
    "platforms",
    "hardware",
    "mcp",
];

pub fn is_known_category(category: &str) -> bool {
    KNOWN_CATEGORIES.contains(&category)
}

/// How the modules of a category are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// Deep-merged into the settings document
    Merge,
    /// Recommendation lists, deduplicated
    Extensions,
    /// Task lists concatenated, inputs deduplicated by id
    Tasks,
}

impl CategoryKind {
    pub fn of(category: &str) -> Self {
        match category {
            "extensions" => Self::Extensions,
            "tasks" => Self::Tasks,
            _ => Self::Merge,
        }
    }

    /// Artifact this kind of category contributes to.
    pub fn artifact(&self) -> ArtifactFile {
        match self {
            Self::Merge => ArtifactFile::Settings,
            Self::Extensions => ArtifactFile::Extensions,
            Self::Tasks => ArtifactFile::Tasks,
        }
    }
}

/// A `(category, filename)` pair declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleReference {
    pub category: String,
    pub filename: String,
}

impl ModuleReference {
    pub fn new(category: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            filename: filename.into(),
        }
    }

    pub fn kind(&self) -> CategoryKind {
        CategoryKind::of(&self.category)
    }
}

impl std::fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.filename)
    }
}

/// Parsed stack manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub name: String,
    pub variables: Bindings,
    pub modules: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<String>,
    variables: Option<IndexMap<String, serde_yaml::Value>>,
    modules: Option<IndexMap<String, Option<Vec<String>>>>,
}

impl Manifest {
    /// Parse a manifest from YAML content.
    ///
    /// `name` and `modules` are required. A category with no entries
    /// (`tasks:` with nothing under it) is kept as an empty list.
    ///
    /// # Example
    ///
    /// ```
    /// use stack_core::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// name: Rust Dev
    /// modules:
    ///   core: [base.json]
    ///   extensions: [rust.json]
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.name, "Rust Dev");
    /// assert_eq!(manifest.modules["core"], vec!["base.json"]);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_labelled(content, PathBuf::from("<manifest>"), true)
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Self::load_with(path, true)
    }

    /// Like [`load`](Self::load) but a missing `name` yields an empty name.
    pub(crate) fn load_unnamed(path: &NormalizedPath) -> Result<Self> {
        Self::load_with(path, false)
    }

    fn load_with(path: &NormalizedPath, require_name: bool) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                path: path.to_native(),
            });
        }
        let content = io::read_text(path)?;
        tracing::debug!(%path, "Parsing manifest");
        Self::parse_labelled(&content, path.to_native(), require_name)
    }

    fn parse_labelled(content: &str, label: PathBuf, require_name: bool) -> Result<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| Error::MalformedManifest {
                path: label,
                message: e.to_string(),
            })?;

        if !value.is_mapping() {
            return Err(Error::invalid_manifest("manifest must be a mapping"));
        }

        let raw: RawManifest = serde_yaml::from_value(value)
            .map_err(|e| Error::invalid_manifest(e.to_string()))?;

        let name = match raw.name {
            Some(name) => name,
            None if !require_name => String::new(),
            None => return Err(Error::invalid_manifest("missing required field 'name'")),
        };
        let modules = raw
            .modules
            .ok_or_else(|| Error::invalid_manifest("missing required field 'modules'"))?
            .into_iter()
            .map(|(category, files)| (category, files.unwrap_or_default()))
            .collect();

        let mut variables = Bindings::new();
        for (key, value) in raw.variables.unwrap_or_default() {
            variables.insert(key.clone(), scalar_to_string(&key, &value)?);
        }

        Ok(Self {
            name,
            variables,
            modules,
        })
    }

    /// A copy of this manifest with `overrides` applied to its variables.
    pub fn with_overrides(&self, overrides: &Bindings) -> Self {
        Self {
            variables: apply_overrides(&self.variables, overrides),
            ..self.clone()
        }
    }

    /// Every declared module reference, in manifest order.
    pub fn references(&self) -> impl Iterator<Item = ModuleReference> + '_ {
        self.modules.iter().flat_map(|(category, files)| {
            files
                .iter()
                .map(move |file| ModuleReference::new(category.clone(), file.clone()))
        })
    }

    /// Whether any category of `kind` declares at least one module.
    pub fn declares(&self, kind: CategoryKind) -> bool {
        self.modules
            .iter()
            .any(|(category, files)| CategoryKind::of(category) == kind && !files.is_empty())
    }

    /// Categories not in [`KNOWN_CATEGORIES`].
    pub fn unknown_categories(&self) -> Vec<&str> {
        self.modules
            .keys()
            .map(String::as_str)
            .filter(|c| !is_known_category(c))
            .collect()
    }
}

fn scalar_to_string(key: &str, value: &serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::invalid_manifest(format!(
            "variable '{key}' must be a string, number or boolean"
        ))),
    }
}
