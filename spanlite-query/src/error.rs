//! Error types for spanlite-query.
//!
//! The core only knows two failure kinds. Mapping them onto wire-level
//! status codes is left to the RPC layer.

use thiserror::Error;

/// Query construction error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The input broke an upstream invariant (e.g. a value with no data).
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failure classification, decoupled from any RPC framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unknown,
    InvalidArgument,
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::Unknown(_) => ErrorKind::Unknown,
            QueryError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            QueryError::Unknown(msg) | QueryError::InvalidArgument(msg) => msg,
        }
    }
}

/// Result type for query construction
pub type QueryResult<T> = Result<T, QueryError>;

impl serde::Serialize for QueryError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
