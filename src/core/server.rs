//! MCP server handler.
//!
//! `McpServer` serves the tools in a [`ToolRegistry`]. STDIO and TCP go
//! through rmcp's `ServerHandler` with a `ToolRouter` built from the
//! registry; the HTTP transport calls [`McpServer::list_tools`] and
//! [`McpServer::call_tool`] directly.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use crate::domains::tools::{ToolRegistry, build_tool_router, build_toolsets};
use crate::razorpay::RazorpayClient;

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

const INSTRUCTIONS: &str = "Razorpay MCP server. Tools fetch and create payments, \
orders, refunds and payment links. Amounts are in the smallest currency unit \
(paise for INR).";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    registry: Arc<ToolRegistry>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server that exposes the tools in `registry`.
    pub fn new(config: Config, registry: ToolRegistry) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(&registry),
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Build the Razorpay client and the enabled toolsets from `config`.
    ///
    /// Fails on missing credentials, an invalid base URL or an unknown
    /// toolset name.
    pub fn from_config(config: Config) -> super::error::Result<Self> {
        config.validate()?;

        let (Some(key_id), Some(key_secret)) = (
            config.credentials.key_id.as_deref(),
            config.credentials.key_secret.as_deref(),
        ) else {
            return Err(Error::config("Razorpay key and secret are required"));
        };

        let mut client = RazorpayClient::new(key_id, key_secret)?;
        if let Some(base_url) = config.api.base_url.as_deref() {
            client = client.with_base_url(base_url)?;
        }
        if let Some(timeout) = config.api.timeout() {
            client = client.with_timeout(timeout);
        }

        let group = build_toolsets(
            Arc::new(client),
            &config.toolsets.enabled,
            config.toolsets.read_only,
        )?;
        let registry = ToolRegistry::from_group(&group);

        info!(
            "Registered {} tools{}",
            registry.len(),
            if config.toolsets.read_only {
                " (read-only)"
            } else {
                ""
            }
        );

        Ok(Self::new(config, registry))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Usage notes sent to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
