//! Centralized error types for scholargraph.

use thiserror::Error;

/// Main error type for graph store operations.
///
/// Idempotent no-ops (an index that already exists, a catalog graph that is
/// already gone) are never represented here; they surface as
/// [`crate::IndexOutcome`] values instead.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query `{query}` failed: {message}")]
    Query { query: String, message: String },

    #[error("Failed to decode field '{field}': {message}")]
    Decode { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for graph store operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a query error carrying the offending query text.
    pub fn query(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
