// tests/property/strategies.rs

//! Generators for JSON documents and well-formed selectors.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Keys drawn from a small alphabet so selectors and documents actually meet.
pub fn key() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "0", "1", "-", "length", "-1"])
        .prop_map(str::to_string)
}

pub fn document() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..5).prop_map(Value::from),
        "[a-z]{0,3}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..5)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// A well-formed selector in its JSON form.
pub fn pointer() -> impl Strategy<Value = Value> {
    let field = prop_oneof![
        key().prop_map(Value::String),
        (-3i64..3).prop_map(Value::from),
    ]
    .boxed();
    let flat = prop::collection::vec(field.clone(), 0..4).prop_map(Value::Array);
    flat.prop_recursive(3, 24, 4, move |inner| {
        let item = prop_oneof![
            3 => field.clone(),
            1 => (key(), inner.clone())
                .prop_map(|(k, sub)| Value::Object(Map::from_iter([(k, sub)]))),
        ];
        prop_oneof![
            3 => prop::collection::vec(item, 0..4).prop_map(Value::Array),
            1 => inner.prop_map(|sub| json!([sub])),
        ]
    })
}
