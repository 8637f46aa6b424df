//! Error types for graph store access

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the graph store
#[derive(Error, Debug)]
pub enum GraphError {
    /// The store rejected or failed to execute a statement
    #[error("Query error: {0}")]
    QueryError(String),

    /// The store could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A statement did not finish within the session timeout
    #[error("Graph store did not answer within {0:?}")]
    Timeout(Duration),

    /// The client was used after its session was closed
    #[error("Graph session is closed")]
    Closed,

    /// A result row did not have the expected shape
    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
