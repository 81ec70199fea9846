//! Razorpay MCP server.
//!
//! Exposes Razorpay payments, orders, refunds and payment links as MCP tools.
//!
//! - **core**: configuration, CLI, logging, errors, the server handler and transports
//! - **domains::tools**: parameter validation, toolsets and the tool definitions
//! - **razorpay**: the REST client the tools call
//!
//! # Example
//!
//! ```rust,no_run
//! use razorpay_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = config.transport.clone();
//!     let server = McpServer::from_config(config)?;
//!     TransportService::new(transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod razorpay;

pub use core::{Config, Error, McpServer, Result};
