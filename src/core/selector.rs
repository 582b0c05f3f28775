// src/core/selector.rs

//! The selector ("pointer") language, parsed from its JSON form into a typed tree.
//!
//! A selector is a JSON array of items:
//! - a string or number copies one field (`["foo", 0, -1, "-", "length"]`);
//! - an object recurses into the named field with the nested selector
//!   (`[{"foo": ["bar"]}]`);
//! - an array as the *only* item maps its inner selector over every element of
//!   an input array (`[["foo", "bar"]]`).

use crate::core::errors::ExtractError;
use crate::core::field::number_key;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A leaf item naming one key or index to copy through.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
    Name(String),
    Index(Number),
}

impl FieldRef {
    /// The key this field is written under, which is also the key it is looked up by.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            FieldRef::Name(name) => Cow::Borrowed(name.as_str()),
            FieldRef::Index(num) => Cow::Owned(number_key(num)),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            FieldRef::Name(name) => Value::String(name.clone()),
            FieldRef::Index(num) => Value::Number(num.clone()),
        }
    }

    /// Accepts strings and numbers; anything else is not a field.
    pub fn from_value(value: &Value) -> Result<Self, ExtractError> {
        match value {
            Value::String(name) => Ok(FieldRef::Name(name.clone())),
            Value::Number(num) => Ok(FieldRef::Index(num.clone())),
            _ => Err(ExtractError::invalid(value)),
        }
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        FieldRef::Name(name.to_string())
    }
}

impl From<i64> for FieldRef {
    fn from(index: i64) -> Self {
        FieldRef::Index(Number::from(index))
    }
}

/// One entry of a field-building selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorItem {
    Field(FieldRef),
    /// Pairs of (input key, nested selector), in declaration order. When more
    /// than one key is present in the input, the last one wins.
    Nested(Vec<(String, Selector)>),
}

impl SelectorItem {
    fn parse(item: &Value) -> Result<Self, ExtractError> {
        match item {
            Value::Object(map) => map
                .iter()
                .map(|(key, nested)| Ok((key.clone(), Selector::parse(nested)?)))
                .collect::<Result<Vec<_>, ExtractError>>()
                .map(SelectorItem::Nested),
            _ => FieldRef::from_value(item).map(SelectorItem::Field),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            SelectorItem::Field(field) => field.to_value(),
            SelectorItem::Nested(pairs) => Value::Object(
                pairs
                    .iter()
                    .map(|(key, nested)| (key.clone(), nested.to_value()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

/// A parsed selector tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Builds an object from the listed items.
    Fields(Vec<SelectorItem>),
    /// Applies the inner selector to every element of an input array.
    EachItem(Box<Selector>),
}

impl Selector {
    /// Parses and validates a whole selector tree.
    ///
    /// Fails with `InvalidSelector` when `pointer` is not an array or mixes an
    /// each-item selector with siblings. Errors inside items are wrapped in a
    /// `SubSelector` carrying `pointer`. Errors of an each-item's inner selector
    /// are passed through unwrapped.
    pub fn parse(pointer: &Value) -> Result<Self, ExtractError> {
        let Value::Array(items) = pointer else {
            return Err(ExtractError::invalid(pointer));
        };

        match items.split_first() {
            Some((Value::Array(_), rest)) if !rest.is_empty() => {
                Err(ExtractError::mixed(pointer))
            }
            Some((inner @ Value::Array(_), _)) => {
                Ok(Selector::EachItem(Box::new(Selector::parse(inner)?)))
            }
            _ => {
                if items.iter().any(Value::is_array) {
                    return Err(ExtractError::mixed(pointer));
                }
                items
                    .iter()
                    .map(|item| SelectorItem::parse(item).map_err(|e| e.within(pointer)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Selector::Fields)
            }
        }
    }

    /// Renders the selector back to its JSON form.
    pub fn to_value(&self) -> Value {
        match self {
            Selector::Fields(items) => {
                Value::Array(items.iter().map(SelectorItem::to_value).collect())
            }
            Selector::EachItem(inner) => Value::Array(vec![inner.to_value()]),
        }
    }

    /// Nesting depth of the tree; a flat field list has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Selector::EachItem(inner) => 1 + inner.depth(),
            Selector::Fields(items) => {
                1 + items
                    .iter()
                    .filter_map(|item| match item {
                        SelectorItem::Nested(pairs) => {
                            pairs.iter().map(|(_, nested)| nested.depth()).max()
                        }
                        SelectorItem::Field(_) => None,
                    })
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

impl TryFrom<&Value> for Selector {
    type Error = ExtractError;

    fn try_from(pointer: &Value) -> Result<Self, Self::Error> {
        Selector::parse(pointer)
    }
}

/// Parsing from text accepts the selector's JSON form, e.g. `[{"foo": ["bar"]}]`.
impl FromStr for Selector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pointer: Value = serde_json::from_str(s)?;
        Ok(Selector::parse(&pointer)?)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pointer = Value::deserialize(deserializer)?;
        Selector::parse(&pointer).map_err(serde::de::Error::custom)
    }
}
