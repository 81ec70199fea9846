//! Helpers shared by the Razorpay tools.

use serde_json::Value;
use tracing::warn;

use crate::domains::tools::{ToolError, ToolResult};
use crate::razorpay::RazorpayError;

/// Failure result for a rejected API call, e.g. `"fetching order failed: ..."`.
pub fn api_failure(action: &str, err: &RazorpayError) -> ToolResult {
    let message = format!("{action} failed: {err}");
    warn!("{}", message);
    ToolResult::error(message)
}

/// Success result holding the API response as JSON text.
pub fn api_success(response: &Value) -> Result<ToolResult, ToolError> {
    ToolResult::json(response)
}
