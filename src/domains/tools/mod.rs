//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Each tool maps one Razorpay API call.
//!
//! ## Architecture
//!
//! - `params.rs` - Typed extraction of call arguments
//! - `validator.rs` - Error-accumulating parameter validation
//! - `schema.rs` - Declarative parameter schemas
//! - `handlers.rs` - The `ToolHandler` trait and `ToolResult`
//! - `toolset.rs` - Toolsets, read-only gating, enablement
//! - `definitions/` - Razorpay tools (one file per resource)
//! - `registry.rs` - Toolset assembly and the transport-facing registry
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Implement `ToolHandler` in the matching file under `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to its toolset in `registry::build_toolsets`, as a read or write tool
//!
//! The router and the HTTP dispatcher pick it up from the registry.

pub mod definitions;
mod error;
mod handlers;
mod params;
mod registry;
pub mod router;
mod schema;
mod toolset;
mod validator;

pub use error::{ToolError, ToolsetError};
pub use handlers::*;
pub use params::{ArgumentBag, ParamKind, ParamType, ParamValue, Payload, ValidationError, extract};
pub use registry::{ToolRegistry, build_toolsets};
pub use router::build_tool_router;
pub use schema::{ToolParameter, input_schema};
pub use toolset::{ToolServer, Toolset, ToolsetGroup};
pub use validator::Validator;
