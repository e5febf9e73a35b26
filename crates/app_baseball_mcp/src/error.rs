//! Custom error types for the MCP server.

use app_baseball_client::{AppBaseballError, RubricError, UnknownCategory};
use thiserror::Error;

/// MCP server errors.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Backend error: {0}")]
    Backend(#[from] AppBaseballError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("Rubric error: {0}")]
    Rubric(#[from] RubricError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<McpError> for String {
    fn from(err: McpError) -> Self {
        err.to_string()
    }
}

/// Result type alias for MCP operations.
pub type McpResult<T> = Result<T, McpError>;
