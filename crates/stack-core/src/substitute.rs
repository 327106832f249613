//! Placeholder substitution over serialized documents
//!
//! Tokens have the form `{{NAME}}`. Bound names are replaced by their value;
//! unbound tokens stay in the output verbatim so they remain visible in the
//! emitted artifact. Replacement is a single left-to-right pass, so a value
//! that itself contains a token is never expanded again.

use indexmap::IndexSet;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::{Bindings, Document, Error, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("Invalid placeholder regex"));

/// Replace every bound `{{NAME}}` token in `text`.
pub fn substitute(text: &str, bindings: &Bindings) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of every placeholder token in `text`, in first-seen order.
pub fn placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Substitute over the pretty-printed form of `document` and parse it back.
///
/// `artifact` labels the error when a replacement value breaks the JSON
/// structure (an unescaped quote, for example).
pub fn substitute_document(
    document: &Document,
    bindings: &Bindings,
    artifact: &str,
) -> Result<Document> {
    let serialized = serde_json::to_string_pretty(document)?;
    let substituted = substitute(&serialized, bindings);
    serde_json::from_str(&substituted).map_err(|e| Error::Substitution {
        artifact: artifact.to_string(),
        message: e.to_string(),
    })
}
