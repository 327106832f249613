//! Variable bindings and runtime overrides

use indexmap::IndexMap;

use crate::{Error, Result};

/// Placeholder name to replacement text, in declaration order.
pub type Bindings = IndexMap<String, String>;

/// Parse a `KEY=VALUE` override. The value may itself contain `=`.
pub fn parse_binding(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::InvalidBinding {
            input: input.to_string(),
        }),
    }
}

/// Parse a list of `KEY=VALUE` overrides. A repeated key keeps its last value.
pub fn parse_bindings<S: AsRef<str>>(inputs: &[S]) -> Result<Bindings> {
    let mut bindings = Bindings::new();
    for input in inputs {
        let (key, value) = parse_binding(input.as_ref())?;
        bindings.insert(key, value);
    }
    Ok(bindings)
}

/// Apply `overrides` on top of `declared`.
///
/// An override replaces the declared value wholesale; names only present in
/// `overrides` are appended after the declared ones.
pub fn apply_overrides(declared: &Bindings, overrides: &Bindings) -> Bindings {
    let mut result = declared.clone();
    for (key, value) in overrides {
        result.insert(key.clone(), value.clone());
    }
    result
}
