use spanlite_query::QueryError;
use thiserror::Error;

use crate::status::{Code, Status};

#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Engine error: {0}")]
    Engine(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EmulatorResult<T> = Result<T, EmulatorError>;

impl serde::Serialize for EmulatorError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl EmulatorError {
    /// Status reported to the RPC client.
    pub fn to_status(&self) -> Status {
        match self {
            EmulatorError::Query(err) => Status::from(err),
            EmulatorError::Json(err) => Status::new(Code::InvalidArgument, err.to_string()),
            // Default to INTERNAL
            EmulatorError::Engine(_) => Status::new(Code::Internal, self.to_string()),
        }
    }
}
