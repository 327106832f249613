//! Format-detecting document loading
//!
//! Module documents are parsed into untyped `serde_json::Value` trees no
//! matter which serialization they are stored in.

use crate::{Error, NormalizedPath, Result, io};
use serde_json::Value;

/// Serialization format of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Format named by the file extension, `None` if it is not a document.
    pub fn detect(path: &NormalizedPath) -> Option<Self> {
        match path.extension().map(str::to_lowercase).as_deref() {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Detect the format from a file extension.
    ///
    /// - `.toml` -> TOML
    /// - `.yaml`, `.yml` -> YAML
    /// - anything else -> JSON, the library convention
    pub fn from_path(path: &NormalizedPath) -> Self {
        Self::detect(path).unwrap_or(Self::Json)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse document text in the given format.
///
/// `path` is only used to label the error.
pub fn parse_document(content: &str, format: DocumentFormat, path: &NormalizedPath) -> Result<Value> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| Error::ConfigParse {
        path: path.to_native(),
        format: format.as_str().into(),
        message,
    })
}

/// Read and parse the document at `path`, detecting its format.
pub fn load_document(path: &NormalizedPath) -> Result<Value> {
    let content = io::read_text(path)?;
    parse_document(&content, DocumentFormat::from_path(path), path)
}
