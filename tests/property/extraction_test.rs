// tests/property/extraction_test.rs

//! Property-based tests for extraction results

use super::strategies::{document, pointer};
use jbp_extract::{Selector, extract};
use proptest::prelude::*;
use serde_json::Value;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_result_is_object_or_array(ptr in pointer(), doc in document()) {
        let result = extract(&ptr, &doc).unwrap();
        prop_assert!(result.is_object() || result.is_array());
    }

    #[test]
    fn test_extract_is_idempotent(ptr in pointer(), doc in document()) {
        let first = extract(&ptr, &doc).unwrap();
        let second = extract(&ptr, &doc).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_each_item_preserves_length(ptr in pointer(), doc in document()) {
        let each = Value::Array(vec![ptr]);
        let result = extract(&each, &doc).unwrap();
        let expected = doc.as_array().map_or(0, Vec::len);
        prop_assert_eq!(result.as_array().map(Vec::len), Some(expected));
    }

    #[test]
    fn test_input_is_never_modified(ptr in pointer(), doc in document()) {
        let before = doc.clone();
        let _ = extract(&ptr, &doc).unwrap();
        prop_assert_eq!(doc, before);
    }

    #[test]
    fn test_result_never_contains_top_level_nulls(ptr in pointer(), doc in document()) {
        if let Value::Object(map) = extract(&ptr, &doc).unwrap() {
            prop_assert!(map.values().all(|v| !v.is_null()));
        }
    }

    #[test]
    fn test_parsed_selector_matches_free_function(ptr in pointer(), doc in document()) {
        let selector = Selector::parse(&ptr).unwrap();
        prop_assert_eq!(selector.extract(&doc), extract(&ptr, &doc).unwrap());
    }
}
