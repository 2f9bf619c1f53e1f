//! Error types for the query engine.

use thiserror::Error;

use crate::mode::Mode;
use crate::step::Command;

/// Errors that can occur while evaluating a predicate program.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The named field does not exist on the record type.
    #[error("field '{field}' not found on {record}")]
    FieldNotFound { record: &'static str, field: String },

    /// The field value and the operand cannot be compared under the mode.
    #[error("type mismatch on '{field}': {mode} cannot compare {actual} field with {expected} operand")]
    TypeMismatch {
        field: String,
        mode: Mode,
        expected: &'static str,
        actual: &'static str,
    },

    /// A comparison without an explicit field ran before any field was bound.
    #[error("{command:?} has no field bound; call where_ (or and_where/or_where) first")]
    NoFieldBound { command: Command },

    /// A comparison step carries no operand.
    #[error("{command:?} on '{field}' has no operand")]
    MissingOperand { command: Command, field: String },

    /// A `like` pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Evaluation of a single record failed, aborting the scan.
    #[error("record #{position}: {source}")]
    Record {
        position: usize,
        #[source]
        source: Box<QueryError>,
    },
}

impl QueryError {
    /// Returns the underlying error, unwrapping any record context.
    pub fn root(&self) -> &QueryError {
        match self {
            QueryError::Record { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the scan position of the failing record, if known.
    pub fn position(&self) -> Option<usize> {
        match self {
            QueryError::Record { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unwraps_record_context() {
        let err = QueryError::Record {
            position: 3,
            source: Box::new(QueryError::FieldNotFound {
                record: "Person",
                field: "height".into(),
            }),
        };
        assert_eq!(err.position(), Some(3));
        assert!(matches!(err.root(), QueryError::FieldNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "record #3: field 'height' not found on Person"
        );
    }

    #[test]
    fn type_mismatch_message() {
        let err = QueryError::TypeMismatch {
            field: "age".into(),
            mode: Mode::LessThan,
            expected: "string",
            actual: "number",
        };
        assert_eq!(
            err.to_string(),
            "type mismatch on 'age': < cannot compare number field with string operand"
        );
    }
}
