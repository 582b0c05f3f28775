// src/core/extractor.rs

//! Applies a selector tree to a JSON value, building a fresh value that holds
//! only the selected data.

use crate::core::errors::ExtractError;
use crate::core::field::{is_truthy, property, resolve_field};
use crate::core::selector::{Selector, SelectorItem};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Extracts the parts of `input` described by `pointer`.
///
/// The pointer is validated as a whole before `input` is read. Data that is
/// not there is never an error: absent keys and out-of-range indices are
/// simply left out of the result, and each-item selectors over non-arrays
/// produce an empty array.
pub fn extract(pointer: &Value, input: &Value) -> Result<Value, ExtractError> {
    let selector = Selector::parse(pointer).inspect_err(|e| {
        debug!("Rejected selector {}: {}", pointer, e);
    })?;
    let extraction = selector.extract(input);
    let entries = match &extraction {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 0,
    };
    debug!(
        "Extracted {} top-level entries with selector of depth {}",
        entries,
        selector.depth()
    );
    Ok(extraction)
}

impl Selector {
    /// Applies an already-parsed selector. The result is an object for a
    /// field-building selector and an array for an each-item selector.
    pub fn extract(&self, input: &Value) -> Value {
        match self {
            Selector::EachItem(inner) => {
                let results: Vec<Value> = match input {
                    Value::Array(elements) => elements.iter().map(|e| inner.extract(e)).collect(),
                    _ => {
                        trace!("Each-item selector applied to a non-array, yielding []");
                        Vec::new()
                    }
                };
                Value::Array(results)
            }
            Selector::Fields(items) => {
                let mut extraction = Map::new();
                for item in items {
                    if let Some((key, value)) = extract_item(item, input) {
                        extraction.insert(key, value);
                    }
                }
                Value::Object(extraction)
            }
        }
    }
}

/// Resolves one item to the key and value it contributes, if any.
fn extract_item(item: &SelectorItem, input: &Value) -> Option<(String, Value)> {
    match item {
        SelectorItem::Field(field) => {
            let key = field.key();
            match resolve_field(field, input) {
                Some(value) if !value.is_null() => Some((key.into_owned(), value)),
                _ => {
                    trace!("Field '{}' not found, omitting", key);
                    None
                }
            }
        }
        SelectorItem::Nested(pairs) => {
            let found = pairs.iter().rev().find_map(|(key, nested)| {
                let sub = property(input, key).filter(|v| is_truthy(v))?;
                Some((key.clone(), nested.extract(&sub)))
            });
            if found.is_none() {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
                trace!("No nested key of {:?} present, omitting", keys);
            }
            found
        }
    }
}
