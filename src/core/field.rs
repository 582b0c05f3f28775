// src/core/field.rs

//! Field resolution: direct key/index lookups, the `length` and `-` array
//! shortcuts, negative indexing, and the truthiness rules that decide whether
//! a looked-up value counts as present.

use crate::core::selector::FieldRef;
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Host truthiness: `null`, `false`, `0` and `""` are falsy. Arrays and
/// objects are always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Looks up `key` as a property of `input`.
///
/// Objects resolve their own keys. Arrays resolve canonical decimal indices
/// (`"3"`, never `"03"`) and `length`. Strings do the same over their
/// characters, an index yielding a one-character string. Every other value has
/// no properties.
pub fn property<'a>(input: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
    match input {
        Value::Object(map) => map.get(key).map(Cow::Borrowed),
        Value::Array(items) => {
            if key == "length" {
                return Some(Cow::Owned(Value::from(items.len())));
            }
            items.get(canonical_index(key)?).map(Cow::Borrowed)
        }
        Value::String(text) => {
            if key == "length" {
                return Some(Cow::Owned(Value::from(text.chars().count())));
            }
            char_at(text, canonical_index(key)?)
        }
        _ => None,
    }
}

/// Parses `key` as an index only when it is spelled the canonical way.
fn canonical_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}

fn char_at<'a>(text: &str, index: usize) -> Option<Cow<'a, Value>> {
    text.chars()
        .nth(index)
        .map(|c| Cow::Owned(Value::String(c.to_string())))
}

/// Parses the leading integer of `text` the way a lenient host `parseInt` does:
/// leading whitespace is skipped, a sign is honoured, `0x` switches to hex, and
/// parsing stops at the first non-digit. Returns `None` when no digit is found.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Out of range indices can never hit an element, so overflow is a miss.
    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Renders a numeric field selector as an object key, dropping the `.0` of
/// whole floats so `2.0` and `2` address the same key.
pub fn number_key(num: &Number) -> String {
    match num.as_f64() {
        Some(f) if num.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if num.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => num.to_string(),
    }
}

/// Returns the element at a possibly-negative `index`.
///
/// Negative indices count back from the end of an array or string. On objects
/// they count back from a numeric `length` key, if there is one. Non-negative
/// indices also address object keys spelled as decimal numbers.
fn element_at(input: &Value, index: i64) -> Option<Cow<'_, Value>> {
    match input {
        Value::Array(items) => items
            .get(position(items.len(), index)?)
            .map(Cow::Borrowed),
        Value::String(text) => char_at(text, position(text.chars().count(), index)?),
        Value::Object(map) if index >= 0 => map.get(&index.to_string()).map(Cow::Borrowed),
        Value::Object(map) => {
            let length = map.get("length")?.as_f64()?;
            let key = number_key(&Number::from_f64(length + index as f64)?);
            map.get(&key).map(Cow::Borrowed)
        }
        _ => None,
    }
}

/// Turns a possibly-negative index into a position within `len` items.
fn position(len: usize, index: i64) -> Option<usize> {
    if index < 0 {
        usize::try_from(len as i64 + index).ok()
    } else {
        usize::try_from(index).ok()
    }
}

/// Resolves a single field selector against `input`.
///
/// A direct lookup only wins when its value is truthy. A falsy value stored
/// under the key (`0`, `false`, `""`) falls through to the integer
/// interpretation of the field, exactly like an absent key does.
pub fn resolve_field(field: &FieldRef, input: &Value) -> Option<Value> {
    let key = field.key();

    if let Value::Array(items) = input {
        match key.as_ref() {
            "length" => return Some(Value::from(items.len())),
            "-" => return items.last().cloned(),
            _ => {}
        }
    }

    if let Some(direct) = property(input, &key)
        && is_truthy(&direct)
    {
        return Some(direct.into_owned());
    }

    let index = parse_int(&key)?;
    element_at(input, index).map(Cow::into_owned)
}
