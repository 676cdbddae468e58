//! Error types for the enhancement controller
//!
//! Nothing here is fatal to the page. Most variants are logged and
//! swallowed by the controller; they are returned from the public
//! operations so callers (and tests) can see what happened.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the document model and the controller
#[derive(Debug, Error)]
pub enum UiError {
    /// A lookup by id, group or selector found nothing
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A form field failed a shape check
    #[error("validation failed for '{field}': {reason}")]
    ValidationFailure { field: String, reason: String },

    /// One initializer failed while scanning the document
    #[error("initializer '{stage}' failed: {reason}")]
    InitFailed { stage: &'static str, reason: String },

    /// Selector text could not be parsed
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The key-value store could not be read or written
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UiError>;

impl UiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        UiError::ElementNotFound(what.into())
    }

    /// Whether the controller should silently skip this error
    pub fn is_benign(&self) -> bool {
        matches!(self, UiError::ElementNotFound(_))
    }
}
