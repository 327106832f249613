//! Error types for stack-fs

use std::path::PathBuf;

/// Result type for stack-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stack-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Module library not found at {path}")]
    LibraryNotFound { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the document that failed to parse, if this is a parse error.
    pub fn parse_path(&self) -> Option<&PathBuf> {
        match self {
            Self::ConfigParse { path, .. } => Some(path),
            _ => None,
        }
    }
}
