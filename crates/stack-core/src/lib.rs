//! Configuration composition engine
//!
//! Assembles environment-specific configuration bundles from a library of
//! categorized modules, driven by a stack manifest:
//!
//! - **Merge engine**: recursive, order-sensitive document merge
//! - **Substitution**: literal `{{NAME}}` replacement after composition
//! - **Collectors**: deduplicated extension recommendations, concatenated
//!   tasks with inputs deduplicated by id
//! - **StackBuilder**: resolves a manifest against a [`ModuleSource`] and
//!   produces the settings, extensions and tasks artifacts
//!
//! # Architecture
//!
//! The merge, substitution and collection functions are pure. The builder
//! reads modules through the [`ModuleSource`] trait, and only
//! [`BuildOutput::write`] touches the output directory.
//!
//! ```text
//!                 stack-cli
//!                     |
//!                 stack-core
//!   manifest -> builder -> merge / collect -> substitute -> artifacts
//!                     |
//!                  stack-fs  (ModuleStore, atomic writes)
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use stack_core::{Bindings, Manifest, MemorySource, StackBuilder};
//!
//! let source = MemorySource::new()
//!     .with("core", "base.json", json!({"files.eol": "\n"}))
//!     .with("settings", "python.json", json!({"python.venvPath": "{{VENV}}"}));
//!
//! let manifest = Manifest::parse(r#"
//! name: Python
//! variables:
//!   VENV: /opt/venv
//! modules:
//!   core: [base.json]
//!   settings: [python.json]
//! "#).unwrap();
//!
//! let output = StackBuilder::new(&source).build(&manifest, &Bindings::new()).unwrap();
//! let settings = output.settings.unwrap().document;
//! assert_eq!(settings["python.venvPath"], "/opt/venv");
//! ```

pub mod builder;
pub mod collect;
pub mod error;
pub mod library;
pub mod manifest;
pub mod merge;
pub mod source;
pub mod substitute;
pub mod validation;
pub mod variables;

/// Untyped configuration tree: null, bool, number, string, list or mapping.
pub type Document = serde_json::Value;

pub use builder::{Artifact, BuildOutput, BuildWarning, StackBuilder};
pub use collect::{LoadedModule, TASKS_VERSION, TasksDocument, collect_extensions, collect_tasks};
pub use error::{Error, Result};
pub use library::{StackLibrary, StackSummary};
pub use manifest::{CategoryKind, KNOWN_CATEGORIES, Manifest, ModuleReference};
pub use merge::{fold_documents, merge, merge_into};
pub use source::{MemorySource, ModuleSource};
pub use stack_fs::ArtifactFile;
pub use substitute::{placeholders, substitute, substitute_document};
pub use validation::{ValidationReport, validate_library};
pub use variables::{Bindings, apply_overrides, parse_binding, parse_bindings};
