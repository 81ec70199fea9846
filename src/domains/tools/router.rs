//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! STDIO/TCP transports are served by rmcp, which dispatches through a
//! `ToolRouter`. Each registered tool becomes one dynamic route.

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};
use rmcp::model::CallToolResult;

use super::handlers::Tool;
use super::registry::ToolRegistry;

/// Create a ToolRoute that runs `tool` with the call's arguments.
pub fn create_route<S>(tool: Tool) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(tool.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let tool = tool.clone();
        async move {
            let result = tool.handle(&args).await.map_err(McpError::from)?;
            Ok::<_, McpError>(CallToolResult::from(result))
        }
        .boxed()
    })
}

/// Build the tool router with every tool in `registry`.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .tools()
        .iter()
        .cloned()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(tool))
        })
}
