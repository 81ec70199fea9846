//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors that can occur during tool operations.
///
/// Input problems and Razorpay API failures are not errors at this level:
/// they are reported to the caller as failed [`ToolResult`](super::ToolResult)s.
/// Only unexpected internal conditions surface as a `ToolError`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments of a call were not a JSON object.
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    /// A successful API response could not be encoded as the tool result.
    #[error("Failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(_) | ToolError::InvalidArguments(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            ToolError::Serialization(_) | ToolError::Internal(_) => {
                McpError::internal_error(err.to_string(), None)
            }
        }
    }
}

/// Errors raised while resolving which toolsets to enable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolsetError {
    /// A requested toolset name is not known to the group.
    #[error("toolset {0} does not exist")]
    Unknown(String),
}
