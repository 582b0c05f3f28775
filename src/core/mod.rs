// src/core/mod.rs

//! The extraction engine: the selector language, field resolution, and the
//! recursive extractor that ties them together.

pub mod errors;
pub mod extractor;
pub mod field;
pub mod selector;

pub use errors::ExtractError;
pub use extractor::extract;
pub use selector::{FieldRef, Selector, SelectorItem};
