//! Error types for the store.

use casper_query::QueryError;

/// Errors that can occur while managing collections or running queries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Evaluating a predicate program failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// No collection is registered under this name.
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    /// The collection exists but holds a different record type.
    #[error("collection '{name}' holds {actual}, not {requested}")]
    CollectionTypeMismatch {
        name: String,
        requested: &'static str,
        actual: &'static str,
    },

    /// A query could not be built from its source.
    #[error("invalid query: {0}")]
    InvalidQuerySyntax(String),

    /// A derived query was called with the wrong number of arguments.
    #[error("query expects {expected} argument(s), got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },

    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    /// Create an invalid-query error.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::InvalidQuerySyntax(msg.into())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_pass_through() {
        let err: Error = QueryError::FieldNotFound {
            record: "Person",
            field: "height".into(),
        }
        .into();
        assert_eq!(err.to_string(), "field 'height' not found on Person");
    }

    #[test]
    fn messages() {
        assert_eq!(
            Error::CollectionNotFound("cats".into()).to_string(),
            "collection 'cats' not found"
        );
        assert_eq!(
            Error::ArgumentCountMismatch {
                expected: 2,
                actual: 1
            }
            .to_string(),
            "query expects 2 argument(s), got 1"
        );
        assert_eq!(
            Error::syntax("bad prefix").to_string(),
            "invalid query: bad prefix"
        );
    }
}
