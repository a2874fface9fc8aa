//! Lazy document nodes: per-member resolution, caching, and
//! materialization.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use json_lens_query::PathEvaluator;

use crate::classify::{classify_fragment, is_associative, Fragment};
use crate::convert;
use crate::error::DocumentError;
use crate::value::{PlainValue, ResolvedValue};

/// Construction options for a root [`DocumentNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeOptions {
    /// Convert scalar text into integers, floats, and date-times. When
    /// false, scalar members resolve to their raw text form.
    pub formatted: bool,
    /// Bound on recursive child-node construction.
    pub max_depth: u32,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            formatted: true,
            max_depth: 255,
        }
    }
}

/// A JSON document (or sub-document) navigated member by member.
///
/// Members are resolved on first access through the document's query
/// evaluator, classified as scalar, sequence, or nested node, and cached.
/// Once a name is in the cache, repeated lookups return the identical
/// value without touching the evaluator again.
///
/// Child nodes are owned by their parent's cache entries; a child's depth
/// is always its parent's plus one, and `max_depth` is shared by the whole
/// tree at construction time.
#[derive(Debug)]
pub struct DocumentNode {
    eval: PathEvaluator,
    cache: IndexMap<String, ResolvedValue>,
    formatted: bool,
    depth: u32,
    max_depth: u32,
    fully_cached: bool,
    // Scratch slot handed out for depth-guarded lookups; never cached.
    absent: Box<ResolvedValue>,
}

impl PartialEq for DocumentNode {
    fn eq(&self, other: &Self) -> bool {
        self.eval == other.eval
            && self.cache == other.cache
            && self.formatted == other.formatted
            && self.depth == other.depth
            && self.max_depth == other.max_depth
            && self.fully_cached == other.fully_cached
    }
}

impl DocumentNode {
    /// Wrap a JSON document with default options (formatted, max depth 255).
    ///
    /// Fails with [`DocumentError::InvalidDocument`] when the text does not
    /// parse as JSON, or [`DocumentError::EvaluatorUnavailable`] when the
    /// query capability cannot be constructed.
    pub fn new(json: &str) -> Result<Self, DocumentError> {
        Self::with_options(json, NodeOptions::default())
    }

    /// Wrap a JSON document with explicit options.
    pub fn with_options(json: &str, options: NodeOptions) -> Result<Self, DocumentError> {
        Self::new_at_depth(json, options.formatted, 0, options.max_depth)
    }

    fn new_at_depth(
        json: &str,
        formatted: bool,
        depth: u32,
        max_depth: u32,
    ) -> Result<Self, DocumentError> {
        let eval = PathEvaluator::load(json).map_err(DocumentError::from_load)?;
        Ok(Self {
            eval,
            cache: IndexMap::new(),
            formatted,
            depth,
            max_depth,
            fully_cached: false,
            absent: Box::new(ResolvedValue::Missing),
        })
    }

    /// Resolve the named member, from cache when possible.
    ///
    /// A raw result of literal `null` fails with
    /// [`DocumentError::MemberNotFound`]; since `null` is the evaluator's
    /// only representation of "missing", a member whose value is the JSON
    /// literal `null` is indistinguishable from an absent one. Catching
    /// `MemberNotFound` is the supported "does this member exist" check.
    ///
    /// Lookups past the depth bound resolve to [`ResolvedValue::Missing`]
    /// without being cached, so they are re-attempted if the bound is
    /// raised later.
    pub fn get(&mut self, name: &str) -> Result<&mut ResolvedValue, DocumentError> {
        if !self.cache.contains_key(name) {
            match self.resolve_member(name)? {
                Some(value) => {
                    self.cache.insert(name.to_string(), value);
                }
                None => {
                    *self.absent = ResolvedValue::Missing;
                    return Ok(&mut self.absent);
                }
            }
        }
        Ok(&mut self.cache[name])
    }

    fn resolve_member(&self, name: &str) -> Result<Option<ResolvedValue>, DocumentError> {
        let path = format!(".{name}");
        let raw = self.filter_raw(&path)?;
        if raw == "null" {
            return Err(DocumentError::MemberNotFound(name.to_string()));
        }
        if self.depth > self.max_depth {
            return Ok(None);
        }
        match classify_fragment(&raw) {
            Fragment::Array => {
                let decoded = self.filter_decoded(&path)?;
                let Value::Array(items) = decoded else {
                    return Err(DocumentError::QueryExecution(format!(
                        "fragment for '{name}' has array shape but decoded as non-array"
                    )));
                };
                Ok(Some(ResolvedValue::Sequence(
                    self.classify_sequence(&items)?,
                )))
            }
            Fragment::Object => {
                if self.depth + 1 > self.max_depth {
                    return Ok(None);
                }
                Ok(Some(ResolvedValue::Node(self.child_from_text(&raw)?)))
            }
            Fragment::Scalar => {
                let value = if self.formatted {
                    convert::convert_text(&raw)?
                } else {
                    ResolvedValue::String(raw)
                };
                Ok(Some(value))
            }
        }
    }

    /// Classify the elements of a decoded array.
    ///
    /// Associative object elements become navigable child nodes populated
    /// from their already-decoded form; list-shaped containers recurse as
    /// sequences; everything else converts as a scalar.
    fn classify_sequence<'a, I>(&self, items: I) -> Result<Vec<ResolvedValue>, DocumentError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut out = Vec::new();
        for item in items {
            out.push(match item {
                Value::Object(map) if is_associative(map) => {
                    if self.depth + 1 > self.max_depth {
                        ResolvedValue::Missing
                    } else {
                        let mut child = self.child_from_text(&item.to_string())?;
                        child.apply(map)?;
                        ResolvedValue::Node(child)
                    }
                }
                Value::Object(map) => {
                    ResolvedValue::Sequence(self.classify_sequence(map.values())?)
                }
                Value::Array(nested) => {
                    ResolvedValue::Sequence(self.classify_sequence(nested)?)
                }
                scalar => convert::convert_value(scalar, self.formatted)?,
            });
        }
        Ok(out)
    }

    /// Populate the cache from externally supplied pre-decoded values
    /// instead of re-querying the evaluator, then mark the node fully
    /// cached.
    ///
    /// Associative container overrides are rebuilt as child nodes scoped at
    /// `.<key>`; a key that does not resolve against the document fails
    /// with [`DocumentError::InvalidArgument`]. Scalar overrides are stored
    /// in converted form. Non-associative container overrides are skipped
    /// and left unresolved.
    pub fn apply(&mut self, overrides: &Map<String, Value>) -> Result<(), DocumentError> {
        for (key, value) in overrides {
            match value {
                Value::Object(map) if is_associative(map) => {
                    let raw = self.filter_raw(&format!(".{key}"))?;
                    if raw == "null" {
                        return Err(DocumentError::InvalidArgument(format!(
                            "'{key}' does not resolve against the document"
                        )));
                    }
                    let mut child = self.child_from_text(&raw)?;
                    child.apply(map)?;
                    self.cache.insert(key.clone(), ResolvedValue::Node(child));
                }
                Value::Object(_) | Value::Array(_) => {}
                scalar => {
                    let converted = convert::convert_value(scalar, self.formatted)?;
                    self.cache.insert(key.clone(), converted);
                }
            }
        }
        self.fully_cached = true;
        Ok(())
    }

    /// Resolve and cache every member of the document. No-op when the node
    /// is already fully cached; otherwise the cache is replaced wholesale.
    ///
    /// Container members past the depth bound are nulled out in the result.
    /// Enumerating the members of a non-object document is a hard
    /// [`DocumentError::QueryExecution`] failure.
    pub fn resolve_all(&mut self) -> Result<(), DocumentError> {
        if self.fully_cached {
            return Ok(());
        }
        let decoded = self.filter_decoded(".")?;
        let Value::Object(members) = decoded else {
            return Err(DocumentError::QueryExecution(
                "cannot enumerate members of a non-object document".to_string(),
            ));
        };

        let mut resolved = IndexMap::with_capacity(members.len());
        for (name, value) in &members {
            let entry = match value {
                Value::Object(_) | Value::Array(_) if self.depth > self.max_depth => {
                    ResolvedValue::Missing
                }
                Value::Array(items) => ResolvedValue::Sequence(self.classify_sequence(items)?),
                Value::Object(map) if is_associative(map) => {
                    if self.depth + 1 > self.max_depth {
                        ResolvedValue::Missing
                    } else {
                        let raw = self.filter_raw(&format!(".{name}"))?;
                        let mut child = self.child_from_text(&raw)?;
                        child.apply(map)?;
                        ResolvedValue::Node(child)
                    }
                }
                Value::Object(map) => {
                    ResolvedValue::Sequence(self.classify_sequence(map.values())?)
                }
                scalar => convert::convert_value(scalar, self.formatted)?,
            };
            resolved.insert(name.clone(), entry);
        }

        self.cache = resolved;
        self.fully_cached = true;
        Ok(())
    }

    /// Fully materialize into nested plain maps and sequences.
    ///
    /// Cached string scalars are passed through scalar conversion once more
    /// on the way out (idempotent for formatted trees; for unformatted
    /// trees this pass formats anyway, so the materialized view is always
    /// the converted one).
    pub fn to_plain(&mut self) -> Result<PlainValue, DocumentError> {
        self.resolve_all()?;
        let mut members = IndexMap::with_capacity(self.cache.len());
        for (name, value) in self.cache.iter_mut() {
            members.insert(name.clone(), plainify(value)?);
        }
        Ok(PlainValue::Map(members))
    }

    /// Resolve everything and encode the plain structure as compact JSON
    /// text. Date-times render as `"YYYY-MM-DD HH:MM:SS"` strings.
    pub fn to_json_string(&mut self) -> Result<String, DocumentError> {
        Ok(self.to_plain()?.to_json_value().to_string())
    }

    /// Capture the fully materialized state of this node.
    ///
    /// The snapshot is the plain-structure representation; feed it to
    /// [`DocumentNode::restore`] to rebuild an equivalent, fully cached
    /// node.
    pub fn snapshot(&mut self) -> Result<PlainValue, DocumentError> {
        self.to_plain()
    }

    /// Rebuild a node from a snapshot taken with [`DocumentNode::snapshot`].
    ///
    /// The snapshot is re-encoded as JSON text, wrapped, and eagerly
    /// re-materialized, so the restored node is fully cached. Only map
    /// snapshots can be restored; anything else fails the eager
    /// materialization.
    pub fn restore(snapshot: &PlainValue, options: NodeOptions) -> Result<Self, DocumentError> {
        let json = snapshot.to_json_value().to_string();
        let mut node = Self::with_options(&json, options)?;
        node.resolve_all()?;
        Ok(node)
    }

    /// Raw JSON text of the entire node.
    pub fn source(&self) -> Result<String, DocumentError> {
        self.filter_raw(".")
    }

    /// Evaluate an arbitrary path expression against this node's document,
    /// returning the decoded match. This escapes the caching layer
    /// entirely.
    pub fn raw_by_key(&self, path: &str) -> Result<Value, DocumentError> {
        self.filter_decoded(path)
    }

    /// Change the depth bound for this node only. Already-cached children
    /// keep the bound they were constructed with.
    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    pub fn is_formatted(&self) -> bool {
        self.formatted
    }

    /// True once every member of the document has been resolved and
    /// cached.
    pub fn is_fully_cached(&self) -> bool {
        self.fully_cached
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    fn child_from_text(&self, json: &str) -> Result<DocumentNode, DocumentError> {
        Self::new_at_depth(json, self.formatted, self.depth + 1, self.max_depth)
    }

    fn filter_raw(&self, path: &str) -> Result<String, DocumentError> {
        self.eval.filter_raw(path).map_err(DocumentError::from_query)
    }

    fn filter_decoded(&self, path: &str) -> Result<Value, DocumentError> {
        self.eval
            .filter_decoded(path)
            .map_err(DocumentError::from_query)
    }
}

/// Depth-first conversion of a cached value into its plain form.
fn plainify(value: &mut ResolvedValue) -> Result<PlainValue, DocumentError> {
    Ok(match value {
        ResolvedValue::Missing => PlainValue::Null,
        ResolvedValue::Bool(b) => PlainValue::Bool(*b),
        ResolvedValue::Integer(i) => PlainValue::Integer(*i),
        ResolvedValue::Float(f) => PlainValue::Float(*f),
        ResolvedValue::DateTime(dt) => PlainValue::DateTime(*dt),
        ResolvedValue::String(s) => match convert::convert_text(s)? {
            ResolvedValue::Integer(i) => PlainValue::Integer(i),
            ResolvedValue::Float(f) => PlainValue::Float(f),
            ResolvedValue::DateTime(dt) => PlainValue::DateTime(dt),
            _ => PlainValue::String(s.clone()),
        },
        ResolvedValue::Sequence(items) => PlainValue::Sequence(
            items
                .iter_mut()
                .map(plainify)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        ResolvedValue::Node(child) => child.to_plain()?,
    })
}
