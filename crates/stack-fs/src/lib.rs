//! Filesystem layer for the configuration stack builder
//!
//! Provides normalized path handling, atomic writes, format-detecting
//! document loading and the [`ModuleStore`] that resolves
//! `(category, filename)` pairs against a module library on disk.

pub mod constants;
pub mod document;
pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use constants::{ArtifactFile, LibraryPath};
pub use document::{DocumentFormat, load_document, parse_document};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::ModuleStore;
