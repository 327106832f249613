//! Error types for stack-core

use std::path::PathBuf;

/// Result type for stack-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors of a build or validation run.
///
/// Missing modules are not errors; they surface as
/// [`BuildWarning`](crate::BuildWarning)s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest file does not exist
    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest file is not valid YAML
    #[error("Malformed manifest {path}: {message}")]
    MalformedManifest { path: PathBuf, message: String },

    /// Manifest parsed but lacks required structure
    #[error("Invalid manifest: {message}")]
    InvalidManifest { message: String },

    /// Module parsed but does not have the shape its category requires
    #[error("Malformed module {path}: {message}")]
    MalformedModule { path: PathBuf, message: String },

    /// Variable override not in KEY=VALUE form
    #[error("Invalid variable override '{input}': expected KEY=VALUE")]
    InvalidBinding { input: String },

    /// Substituted artifact text no longer parses
    #[error("Variable substitution produced invalid {artifact}: {message}")]
    Substitution { artifact: String, message: String },

    /// Filesystem error from stack-fs
    #[error(transparent)]
    Fs(#[from] stack_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    pub fn malformed_module(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedModule {
            path: path.into(),
            message: message.into(),
        }
    }
}
