// src/core/errors.rs

//! Defines the error type raised when a selector cannot be applied.

use serde_json::{Value, json};
use thiserror::Error;

pub const INVALID_SELECTOR: &str = "Invalid selector";
pub const MIXED_EACH_ITEM: &str =
    "An each-item array selector can't be mixed with other selectors.";
pub const SUB_SELECTOR: &str = "Sub-selector error";

/// Errors produced while parsing a selector.
///
/// Missing data is never an error; only a structurally broken selector is.
/// `SubSelector` wraps the error of a nested or field-level item together with
/// the selector that contained it, so an error raised deep inside a tree
/// carries one wrapper per level on its way out.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("{message}")]
    InvalidSelector { message: String, context: Value },

    #[error("Sub-selector error")]
    SubSelector {
        selector: Value,
        #[source]
        source: Box<ExtractError>,
    },
}

impl ExtractError {
    /// A malformed selector fragment, reported with the generic message.
    pub fn invalid(context: &Value) -> Self {
        ExtractError::InvalidSelector {
            message: INVALID_SELECTOR.to_string(),
            context: context.clone(),
        }
    }

    /// An each-item selector that shares its sequence with other items.
    pub fn mixed(selector: &Value) -> Self {
        ExtractError::InvalidSelector {
            message: MIXED_EACH_ITEM.to_string(),
            context: selector.clone(),
        }
    }

    /// Wraps `self` as the failure of an item inside `selector`.
    pub fn within(self, selector: &Value) -> Self {
        ExtractError::SubSelector {
            selector: selector.clone(),
            source: Box::new(self),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ExtractError::InvalidSelector { message, .. } => message,
            ExtractError::SubSelector { .. } => SUB_SELECTOR,
        }
    }

    /// The structured payload attached to this error.
    pub fn context(&self) -> Value {
        match self {
            ExtractError::InvalidSelector { context, .. } => context.clone(),
            ExtractError::SubSelector { selector, source } => json!({
                "ptr": selector,
                "error": source.to_json(),
            }),
        }
    }

    /// Renders the error as a `{"msg": .., "ctx": ..}` object, nesting wrapped errors.
    pub fn to_json(&self) -> Value {
        json!({
            "msg": self.message(),
            "ctx": self.context(),
        })
    }

    /// Walks the chain from this error down to the innermost one.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of `SubSelector` wrappers around the root cause.
    pub fn depth(&self) -> usize {
        self.chain().count() - 1
    }

    pub fn root_cause(&self) -> &ExtractError {
        let mut current = self;
        while let ExtractError::SubSelector { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// The selectors of every wrapper, outermost first. Together they spell
    /// out the path through the tree to the broken fragment.
    pub fn selector_path(&self) -> Vec<&Value> {
        self.chain()
            .filter_map(|e| match e {
                ExtractError::SubSelector { selector, .. } => Some(selector),
                ExtractError::InvalidSelector { .. } => None,
            })
            .collect()
    }
}

/// Iterator returned by [`ExtractError::chain`].
pub struct Chain<'a> {
    next: Option<&'a ExtractError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ExtractError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if let ExtractError::SubSelector { source, .. } = current {
            self.next = Some(&**source);
        }
        Some(current)
    }
}
