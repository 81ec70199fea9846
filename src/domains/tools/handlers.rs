//! Tool handler contract.
//!
//! Every Razorpay tool implements [`ToolHandler`]: it declares its name,
//! description and parameter schema, and handles a call given the raw
//! argument bag. Handlers are shared as [`Tool`] (`Arc<dyn ToolHandler>`)
//! between the toolsets, the registry and the transports.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

use super::error::ToolError;
use super::params::ArgumentBag;
use super::schema::{ToolParameter, input_schema};

/// A shareable tool.
pub type Tool = Arc<dyn ToolHandler>;

/// Output from a tool execution.
///
/// A failed result is a normal, non-fatal answer carrying human-readable
/// text; the calling agent may retry with corrected arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Result text (JSON for successful API calls).
    pub text: String,

    /// Whether the result represents a failure.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful text result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Create a failed result.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Create a successful result holding `data` encoded as JSON.
    pub fn json<T: Serialize + ?Sized>(data: &T) -> Result<Self, ToolError> {
        Ok(Self::text(serde_json::to_string(data)?))
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        let content = vec![Content::text(result.text)];
        if result.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Trait implemented by every tool exposed by the server.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the name of this tool.
    fn name(&self) -> &'static str;

    /// Get the description of this tool.
    fn description(&self) -> &'static str;

    /// Declared parameters, advertised to clients as the input schema.
    fn parameters(&self) -> Vec<ToolParameter>;

    /// Handle one invocation.
    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool(&self) -> rmcp::model::Tool {
        rmcp::model::Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: Arc::new(input_schema(&self.parameters())),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
