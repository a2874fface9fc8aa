use json_lens_query::QueryError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentError {
    /// The document text did not parse as JSON at construction.
    #[error("INVALID_DOCUMENT: {0}")]
    InvalidDocument(String),

    /// The query-evaluation capability could not be constructed.
    #[error("EVALUATOR_UNAVAILABLE: {0}")]
    EvaluatorUnavailable(String),

    /// The evaluator failed during a filter call against a loaded document.
    #[error("QUERY_EXECUTION: {0}")]
    QueryExecution(String),

    /// The requested member is absent from the document (or its value is
    /// the JSON literal `null`; the two are indistinguishable).
    #[error("MEMBER_NOT_FOUND: {0}")]
    MemberNotFound(String),

    /// Text matched the date pattern but a captured field is out of range.
    #[error("DATE_CONVERSION: {0}")]
    DateConversion(String),

    /// A recursion-unpack override names a member that does not resolve
    /// against the document.
    #[error("INVALID_ARGUMENT: {0}")]
    InvalidArgument(String),
}

impl DocumentError {
    /// Map an evaluator failure raised while loading a document.
    pub(crate) fn from_load(err: QueryError) -> Self {
        match err {
            QueryError::Unavailable(msg) => DocumentError::EvaluatorUnavailable(msg),
            other => DocumentError::InvalidDocument(other.to_string()),
        }
    }

    /// Map an evaluator failure raised after construction. Every such
    /// failure is escalated to a hard `QueryExecution` error.
    pub(crate) fn from_query(err: QueryError) -> Self {
        match err {
            QueryError::Unavailable(msg) => DocumentError::EvaluatorUnavailable(msg),
            other => DocumentError::QueryExecution(other.to_string()),
        }
    }
}
