// src/lib.rs

//! Selector-driven extraction over JSON values.
//!
//! ```
//! use serde_json::json;
//!
//! let picked = jbp_extract::extract(
//!     &json!([{"foo": ["bar"]}]),
//!     &json!({"foo": {"bar": 3, "baz": 12}, "quux": "hello"}),
//! )
//! .unwrap();
//! assert_eq!(picked, json!({"foo": {"bar": 3}}));
//! ```

pub mod config;
pub mod core;

// Re-export
pub use crate::core::{ExtractError, FieldRef, Selector, SelectorItem, extract};
