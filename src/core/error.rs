//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for startup and server
//! operation. Per-call problems (bad arguments, rejected API calls) never
//! reach it: tools report those as failed results.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// A requested toolset does not exist.
    #[error("Toolset error: {0}")]
    Toolset(#[from] crate::domains::tools::ToolsetError),

    /// The Razorpay client could not be built or a call failed.
    #[error("Razorpay error: {0}")]
    Razorpay(#[from] crate::razorpay::RazorpayError),

    /// Transport setup or runtime failure.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
