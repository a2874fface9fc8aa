//! Dot-path query evaluation over JSON documents.
//!
//! This crate provides the query capability consumed by the `json-lens`
//! core: load a JSON document once, then evaluate dot-prefixed member-access
//! paths against it in either of two output modes (raw text or decoded
//! value).
//!
//! # Example
//!
//! ```
//! use json_lens_query::{FilterMode, Filtered, PathEvaluator};
//!
//! let eval = PathEvaluator::load(r#"{"store": {"open": true}}"#).unwrap();
//!
//! // Raw mode renders the fragment as text.
//! assert_eq!(eval.filter_raw(".store").unwrap(), r#"{"open":true}"#);
//!
//! // Decoded mode returns the value itself.
//! let open = eval.filter(".store.open", FilterMode::Decoded).unwrap();
//! assert_eq!(open, Filtered::Decoded(serde_json::json!(true)));
//! ```

mod types;
pub use types::*;

mod parser;
pub use parser::PathParser;

mod eval;
pub use eval::PathEvaluator;
