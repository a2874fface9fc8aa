//! Fragment and container classification.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

/// The shape of a raw JSON fragment, as seen by the textual classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fragment {
    Scalar,
    Array,
    Object,
}

fn array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[.*\]$").unwrap())
}

fn object_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\{.*\}$").unwrap())
}

/// Classify a raw fragment by its textual shape.
pub(crate) fn classify_fragment(raw: &str) -> Fragment {
    if array_regex().is_match(raw) {
        Fragment::Array
    } else if object_regex().is_match(raw) {
        Fragment::Object
    } else {
        Fragment::Scalar
    }
}

/// True if the object behaves as a keyed container rather than a list:
/// its keys, in order, are not exactly the contiguous run `"0".."n-1"`.
/// The empty object is list-like.
pub(crate) fn is_associative(map: &Map<String, Value>) -> bool {
    map.keys()
        .enumerate()
        .any(|(index, key)| *key != index.to_string())
}
