//! Transports, each behind a cargo feature:
//!
//! - `stdio` (default): rmcp over stdin/stdout
//! - `tcp`: rmcp over TCP, one session per connection
//! - `http`: JSON-RPC over HTTP POST (axum)

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
