//! Resolved and materialized value representations.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde_json::Value;

use crate::node::DocumentNode;

/// The result of resolving one member of a document.
///
/// Scalars are converted per the formatting rules, arrays become sequences
/// whose object-shaped elements are navigable nodes, and objects become
/// nested [`DocumentNode`]s.
#[derive(Debug, PartialEq)]
pub enum ResolvedValue {
    /// An absent value: a depth-guarded lookup, or a JSON `null` reached
    /// through a decoded container.
    Missing,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
    Sequence(Vec<ResolvedValue>),
    Node(DocumentNode),
}

impl ResolvedValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, ResolvedValue::Missing)
    }

    /// Borrow the nested node, if this member resolved to an object.
    pub fn as_node_mut(&mut self) -> Option<&mut DocumentNode> {
        match self {
            ResolvedValue::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Borrow the element sequence, if this member resolved to an array.
    pub fn as_sequence(&self) -> Option<&[ResolvedValue]> {
        match self {
            ResolvedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// The fully materialized, externally consumable view of a document:
/// nested maps and sequences of plain scalar values, with no nodes and no
/// evaluator handles left inside.
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
    Sequence(Vec<PlainValue>),
    Map(IndexMap<String, PlainValue>),
}

impl PlainValue {
    /// Encode as a `serde_json::Value`. DateTimes render as
    /// `"YYYY-MM-DD HH:MM:SS"` text; non-finite floats render as `null`.
    pub fn to_json_value(&self) -> Value {
        match self {
            PlainValue::Null => Value::Null,
            PlainValue::Bool(b) => Value::Bool(*b),
            PlainValue::Integer(i) => Value::from(*i),
            PlainValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            PlainValue::String(s) => Value::String(s.clone()),
            PlainValue::DateTime(dt) => {
                Value::String(dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            PlainValue::Sequence(items) => {
                Value::Array(items.iter().map(Self::to_json_value).collect())
            }
            PlainValue::Map(members) => {
                let mut map = serde_json::Map::with_capacity(members.len());
                for (name, value) in members {
                    map.insert(name.clone(), value.to_json_value());
                }
                Value::Object(map)
            }
        }
    }
}
