//! Dot-path evaluator.

use serde_json::Value;

use crate::parser::PathParser;
use crate::types::{FilterMode, Filtered, QueryError, Step};

/// A loaded JSON document that can be queried with dot-path expressions.
///
/// Evaluation follows jq semantics: member access on an object yields the
/// member's value or `null` when absent, access on `null` yields `null`,
/// and access on any other mismatched value is a hard `TypeMismatch` error.
/// The `null` result is the only representation of "missing".
#[derive(Debug, Clone, PartialEq)]
pub struct PathEvaluator {
    doc: Value,
}

impl PathEvaluator {
    /// Parse and own a JSON document. Failure means the text is not JSON.
    pub fn load(json: &str) -> Result<Self, QueryError> {
        let doc =
            serde_json::from_str(json).map_err(|e| QueryError::InvalidJson(e.to_string()))?;
        Ok(Self { doc })
    }

    /// The decoded document this evaluator queries.
    pub fn document(&self) -> &Value {
        &self.doc
    }

    /// Evaluate `path` and render the match in the requested mode.
    pub fn filter(&self, path: &str, mode: FilterMode) -> Result<Filtered, QueryError> {
        match mode {
            FilterMode::Raw => self.filter_raw(path).map(Filtered::Raw),
            FilterMode::Decoded => self.filter_decoded(path).map(Filtered::Decoded),
        }
    }

    /// Evaluate `path` and render the match as raw text.
    ///
    /// Strings render as their unquoted contents; everything else renders as
    /// compact JSON text, so `^\[.*\]$` / `^\{.*\}$` shapes identify array
    /// and object fragments.
    pub fn filter_raw(&self, path: &str) -> Result<String, QueryError> {
        Ok(match self.eval(path)? {
            None => "null".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(value) => value.to_string(),
        })
    }

    /// Evaluate `path` and return a decoded clone of the match.
    pub fn filter_decoded(&self, path: &str) -> Result<Value, QueryError> {
        Ok(self.eval(path)?.cloned().unwrap_or(Value::Null))
    }

    /// Walk the parsed steps. `None` means the walk fell off the document
    /// (an absent member or out-of-bounds index), which renders as `null`.
    fn eval(&self, path: &str) -> Result<Option<&Value>, QueryError> {
        let steps = PathParser::parse(path)?;
        let mut current = Some(&self.doc);
        for step in &steps {
            let Some(value) = current else { break };
            current = match (step, value) {
                (Step::Member(name), Value::Object(map)) => map.get(name),
                (Step::Member(_), Value::Null) => None,
                (Step::Member(name), other) => {
                    return Err(QueryError::TypeMismatch(format!(
                        "cannot access member '{name}' of {}",
                        json_type(other)
                    )))
                }
                (Step::Index(index), Value::Array(arr)) => {
                    normalize_index(*index, arr.len()).and_then(|i| arr.get(i))
                }
                (Step::Index(_), Value::Null) => None,
                (Step::Index(index), other) => {
                    return Err(QueryError::TypeMismatch(format!(
                        "cannot index {} with [{index}]",
                        json_type(other)
                    )))
                }
            };
        }
        Ok(current)
    }
}

fn normalize_index(index: isize, len: usize) -> Option<usize> {
    if index < 0 {
        let from_end = index.unsigned_abs();
        if from_end > len {
            return None;
        }
        Some(len - from_end)
    } else {
        Some(index as usize)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
