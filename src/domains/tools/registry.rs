//! Tool Registry - the set of tools this server instance exposes.
//!
//! [`build_toolsets`] assembles the four Razorpay toolsets and enables the
//! requested ones. The group then registers its eligible tools into a
//! [`ToolRegistry`], which is what the transports talk to:
//! - the rmcp `ToolRouter` is built from it (STDIO/TCP)
//! - HTTP JSON-RPC calls are dispatched through it

use std::sync::Arc;

use tracing::{debug, warn};

use crate::razorpay::RazorpayClient;

use super::definitions::{
    CreateOrderTool, CreatePaymentLinkTool, CreateRefundTool, FetchAllOrdersTool, FetchOrderTool,
    FetchPaymentLinkTool, FetchPaymentTool, FetchRefundTool, UpdateRefundTool,
};
use super::error::{ToolError, ToolsetError};
use super::handlers::{Tool, ToolResult};
use super::params::ArgumentBag;
use super::toolset::{ToolServer, Toolset, ToolsetGroup};

/// Build every Razorpay toolset and enable those named in `enabled`.
///
/// An empty `enabled` list turns everything on.
pub fn build_toolsets<S: AsRef<str>>(
    client: Arc<RazorpayClient>,
    enabled: &[S],
    read_only: bool,
) -> Result<ToolsetGroup, ToolsetError> {
    let mut group = ToolsetGroup::new(read_only);

    let payments = Toolset::new("payments", "Razorpay Payments related tools")
        .add_read_tools([tool(FetchPaymentTool::new(client.clone()))]);

    let payment_links = Toolset::new("payment_links", "Razorpay Payment Links related tools")
        .add_read_tools([tool(FetchPaymentLinkTool::new(client.clone()))])
        .add_write_tools([tool(CreatePaymentLinkTool::new(client.clone()))]);

    let orders = Toolset::new("orders", "Razorpay Orders related tools")
        .add_read_tools([
            tool(FetchOrderTool::new(client.clone())),
            tool(FetchAllOrdersTool::new(client.clone())),
        ])
        .add_write_tools([tool(CreateOrderTool::new(client.clone()))]);

    let refunds = Toolset::new("refunds", "Razorpay Refunds related tools")
        .add_read_tools([tool(FetchRefundTool::new(client.clone()))])
        .add_write_tools([
            tool(CreateRefundTool::new(client.clone())),
            tool(UpdateRefundTool::new(client)),
        ]);

    group.add_toolset(payments);
    group.add_toolset(payment_links);
    group.add_toolset(orders);
    group.add_toolset(refunds);

    group.enable_toolsets(enabled)?;
    Ok(group)
}

fn tool<T: super::ToolHandler + 'static>(handler: T) -> Tool {
    Arc::new(handler)
}

/// Tool registry - the tools registered by the enabled toolsets.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

impl ToolServer for ToolRegistry {
    fn add_tools(&mut self, tools: Vec<Tool>) {
        for tool in tools {
            match self.tools.iter_mut().find(|t| t.name() == tool.name()) {
                Some(existing) => *existing = tool,
                None => self.tools.push(tool),
            }
        }
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the eligible tools of `group`.
    pub fn from_group(group: &ToolsetGroup) -> Self {
        let mut registry = Self::new();
        group.register_tools(&mut registry);
        debug!(tools = ?registry.tool_names(), "Tool registry ready");
        registry
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both HTTP and STDIO/TCP transports list tools from here.
    pub fn list_tools(&self) -> Vec<rmcp::model::Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }

    /// Run the tool called `name`.
    pub async fn call(&self, name: &str, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };
        tool.handle(arguments).await
    }

    /// Dispatch an HTTP tool call and encode the `CallToolResult`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => ArgumentBag::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "expected an object, got {other}"
                )));
            }
        };
        let result = self.call(name, &arguments).await?;
        let result: rmcp::model::CallToolResult = result.into();
        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> Arc<RazorpayClient> {
        Arc::new(
            RazorpayClient::new("sample_key", "sample_secret")
                .unwrap()
                .with_base_url("http://127.0.0.1:9")
                .unwrap(),
        )
    }

    fn registry(enabled: &[&str], read_only: bool) -> ToolRegistry {
        let group = build_toolsets(offline_client(), enabled, read_only).unwrap();
        ToolRegistry::from_group(&group)
    }

    #[test]
    fn test_all_toolsets_enabled_by_default() {
        let names = registry(&[], false).tool_names();
        assert_eq!(names.len(), 9);
        for expected in [
            "fetch_payment",
            "fetch_payment_link",
            "create_payment_link",
            "fetch_order",
            "fetch_all_orders",
            "create_order",
            "fetch_refund",
            "create_refund",
            "update_refund",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_read_only_exposes_only_read_tools() {
        let mut names = registry(&[], true).tool_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "fetch_all_orders",
                "fetch_order",
                "fetch_payment",
                "fetch_payment_link",
                "fetch_refund",
            ]
        );
    }

    #[test]
    fn test_selected_toolsets() {
        let names = registry(&["payments", "refunds"], false).tool_names();
        assert_eq!(
            names,
            vec!["fetch_payment", "fetch_refund", "create_refund", "update_refund"]
        );
    }

    #[test]
    fn test_unknown_toolset_is_fatal() {
        let err = build_toolsets(offline_client(), &["payments", "settlements"], false)
            .unwrap_err();
        assert_eq!(err.to_string(), "toolset settlements does not exist");
    }

    #[test]
    fn test_list_tools_metadata() {
        let tools = registry(&["orders"], false).list_tools();
        assert_eq!(tools.len(), 3);
        let create = tools.iter().find(|t| t.name == "create_order").unwrap();
        assert_eq!(
            create.description.as_deref(),
            Some("Create a new order in Razorpay")
        );
        assert_eq!(create.input_schema["type"], "object");
    }

    #[test]
    fn test_add_tools_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.add_tools(vec![tool(FetchOrderTool::new(offline_client()))]);
        registry.add_tools(vec![tool(FetchOrderTool::new(offline_client()))]);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = registry(&["payments"], false);
        let err = registry
            .call("create_order", &ArgumentBag::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_call_runs_validation() {
        let registry = registry(&["orders"], false);
        let result = registry
            .call("fetch_order", &ArgumentBag::new())
            .await
            .unwrap();
        assert!(result.is_error);
        assert_eq!(
            result.text,
            "Validation errors:\n- missing required parameter: order_id"
        );
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_tool_encodes_result() {
        let registry = registry(&["orders"], false);
        let value = registry
            .call_tool("fetch_order", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(
            value["content"][0]["text"],
            "Validation errors:\n- missing required parameter: order_id"
        );
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_tool_rejects_non_object() {
        let registry = registry(&["orders"], false);
        let err = registry
            .call_tool("fetch_order", serde_json::json!([1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
