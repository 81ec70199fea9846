//! Server infrastructure: configuration and CLI, logging, errors, the MCP
//! server handler and its transports.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod transport;

pub use cli::Cli;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::{LogTarget, init_logging};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
