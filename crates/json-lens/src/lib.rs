//! Lazy, on-demand navigation of a parsed JSON document.
//!
//! Instead of eagerly materializing a whole JSON tree, a [`DocumentNode`]
//! resolves members as they are requested: each access asks the document's
//! query evaluator for the raw fragment at that member, classifies it as a
//! scalar, a sequence, or a nested object, converts scalars into richer
//! native types (integers, floats, date-times) in formatted mode, and
//! caches the result so the evaluator is consulted at most once per name.
//!
//! # Example
//!
//! ```
//! use json_lens::{DocumentNode, ResolvedValue};
//!
//! let mut doc = DocumentNode::new(
//!     r#"{"name": "arthur", "logins": 42, "last_seen": "2021-05-01"}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(*doc.get("logins").unwrap(), ResolvedValue::Integer(42));
//! assert!(matches!(
//!     doc.get("last_seen").unwrap(),
//!     ResolvedValue::DateTime(_)
//! ));
//!
//! // Absent members are reported as errors, not silent nulls.
//! assert!(doc.get("nope").is_err());
//! ```

mod classify;
mod convert;
mod error;
mod node;
mod value;

pub use error::DocumentError;
pub use node::{DocumentNode, NodeOptions};
pub use value::{PlainValue, ResolvedValue};

pub use json_lens_query::{FilterMode, Filtered, PathEvaluator, QueryError};
