// tests/property/selector_test.rs

//! Property-based tests for selector parsing

use super::strategies::pointer;
use jbp_extract::{ExtractError, Selector, extract};
use proptest::prelude::*;
use serde_json::{Value, json};

proptest! {
    #[test]
    fn test_parse_then_render_is_stable(ptr in pointer()) {
        let selector = Selector::parse(&ptr).unwrap();
        prop_assert_eq!(selector.to_value(), ptr.clone());
        let reparsed: Selector = selector.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, selector);
    }

    #[test]
    fn test_mixing_each_item_is_always_rejected(ptr in pointer(), extra in "[a-z]{1,3}") {
        let mixed = json!([ptr, extra]);
        let err = extract(&mixed, &Value::Null).unwrap_err();
        let is_invalid = matches!(err, ExtractError::InvalidSelector { .. });
        prop_assert!(is_invalid);
    }

    #[test]
    fn test_non_array_selectors_are_rejected(text in ".{0,12}") {
        let err = extract(&Value::String(text), &json!({})).unwrap_err();
        prop_assert_eq!(err.depth(), 0);
    }
}
