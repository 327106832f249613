//! Recursive document merge
//!
//! Merge rules, applied key-wise when both sides are mappings:
//!
//! - a key present on one side only is kept as-is
//! - two mappings recurse
//! - two lists concatenate, base items first, duplicates kept
//! - anything else (two scalars, or mismatched types) takes the update
//!
//! The merge is order-sensitive: `merge(a, b)` and `merge(b, a)` differ
//! whenever a scalar collides.

use serde_json::{Map, Value};

use crate::Document;

/// Merge `update` on top of `base`, returning the combined document.
pub fn merge(base: &Document, update: &Document) -> Document {
    let mut result = base.clone();
    merge_into(&mut result, update);
    result
}

/// Merge `update` into `base` in place.
pub fn merge_into(base: &mut Document, update: &Document) {
    match (base, update) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, update_val) in update_map {
                match base_map.get_mut(key) {
                    Some(base_val) => merge_into(base_val, update_val),
                    None => {
                        base_map.insert(key.clone(), update_val.clone());
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(update_items)) => {
            base_items.extend(update_items.iter().cloned());
        }
        (base, update) => {
            *base = update.clone();
        }
    }
}

/// Fold documents left to right starting from an empty mapping.
pub fn fold_documents<'a, I>(documents: I) -> Document
where
    I: IntoIterator<Item = &'a Document>,
{
    documents
        .into_iter()
        .fold(Value::Object(Map::new()), |mut acc, doc| {
            merge_into(&mut acc, doc);
            acc
        })
}
