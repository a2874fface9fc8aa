//! Type definitions for dot-path queries.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("INVALID_JSON: {0}")]
    InvalidJson(String),

    #[error("INVALID_PATH: {0}")]
    InvalidPath(String),

    #[error("TYPE_MISMATCH: {0}")]
    TypeMismatch(String),

    /// Reserved for evaluator backends whose underlying capability is
    /// missing at runtime. The built-in evaluator never emits it.
    #[error("UNAVAILABLE: {0}")]
    Unavailable(String),
}

/// A single step of a parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Object member access: `.name`.
    Member(String),
    /// Array index access: `[2]`. Negative indexes count from the end.
    Index(isize),
}

/// Output mode of a filter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Textual rendering of the matched fragment. Strings render as their
    /// unquoted contents; every other value renders as compact JSON text.
    Raw,
    /// A decoded clone of the matched value.
    Decoded,
}

/// The tagged result of a filter call.
#[derive(Debug, Clone, PartialEq)]
pub enum Filtered {
    Raw(String),
    Decoded(Value),
}
