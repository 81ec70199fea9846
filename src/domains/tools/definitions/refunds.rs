//! Refund tools: `create_refund`, `fetch_refund`, `update_refund`.

use std::sync::Arc;

use super::common::{api_failure, api_success};
use crate::domains::tools::{
    ArgumentBag, Payload, ToolError, ToolHandler, ToolParameter, ToolResult, Validator,
};
use crate::razorpay::RazorpayClient;

/// Creates a normal refund for a payment.
#[derive(Debug, Clone)]
pub struct CreateRefundTool {
    client: Arc<RazorpayClient>,
}

impl CreateRefundTool {
    pub const NAME: &'static str = "create_refund";
    pub const DESCRIPTION: &'static str = "Use this tool to create a normal refund for a payment. \
         Amount should be in the smallest currency unit (e.g., for ₹295, use 29500)";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateRefundTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::string("payment_id")
                .description(
                    "Unique identifier of the payment which needs to be refunded. \
                     ID should have a pay_ prefix.",
                )
                .required(),
            ToolParameter::number("amount")
                .description("Payment amount in the smallest currency unit (e.g., for ₹295, use 29500)")
                .required(),
            ToolParameter::string("speed")
                .description(
                    "The speed at which the refund is to be processed. Default is 'normal'. \
                     For instant refunds, speed is set as 'optimum'.",
                )
                .enum_values(["normal", "optimum"]),
            ToolParameter::object("notes")
                .description(
                    "Key-value pairs used to store additional information. \
                     A maximum of 15 key-value pairs can be included.",
                )
                .max_properties(15),
            ToolParameter::string("receipt")
                .description("A unique identifier provided by you for your internal reference."),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut data = Payload::new();
        let mut validator = Validator::new(arguments);
        validator
            .required_string(&mut payload, "payment_id")
            .required_float(&mut payload, "amount")
            .optional_string(&mut data, "speed")
            .optional_string(&mut data, "receipt")
            .optional_map(&mut data, "notes");

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        let payment_id = payload.get_str("payment_id").unwrap_or_default();
        // Sub-unit amounts are whole numbers; any fraction is dropped.
        let amount = payload.get_f64("amount").unwrap_or_default() as i64;
        match self.client.payments().refund(payment_id, amount, &data).await {
            Ok(refund) => api_success(&refund),
            Err(err) => Ok(api_failure("creating refund", &err)),
        }
    }
}

/// Fetches one refund by id.
#[derive(Debug, Clone)]
pub struct FetchRefundTool {
    client: Arc<RazorpayClient>,
}

impl FetchRefundTool {
    pub const NAME: &'static str = "fetch_refund";
    pub const DESCRIPTION: &'static str =
        "Use this tool to retrieve the details of a specific refund using its id.";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for FetchRefundTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::string("refund_id")
                .description(
                    "Unique identifier of the refund which is to be retrieved. \
                     ID should have a rfnd_ prefix.",
                )
                .required(),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut validator = Validator::new(arguments);
        validator.required_string(&mut payload, "refund_id");

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        let refund_id = payload.get_str("refund_id").unwrap_or_default();
        match self.client.refunds().fetch(refund_id, &Payload::new()).await {
            Ok(refund) => api_success(&refund),
            Err(err) => Ok(api_failure("fetching refund", &err)),
        }
    }
}

/// Updates the notes of a refund. Notes are the only mutable field.
#[derive(Debug, Clone)]
pub struct UpdateRefundTool {
    client: Arc<RazorpayClient>,
}

impl UpdateRefundTool {
    pub const NAME: &'static str = "update_refund";
    pub const DESCRIPTION: &'static str = "Use this tool to update the notes for a specific refund. \
         Only the notes field can be modified.";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for UpdateRefundTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::string("refund_id")
                .description(
                    "Unique identifier of the refund which needs to be updated. \
                     ID should have a rfnd_ prefix.",
                )
                .required(),
            ToolParameter::object("notes")
                .description(
                    "Key-value pairs used to store additional information. \
                     A maximum of 15 key-value pairs can be included, \
                     with each value not exceeding 256 characters.",
                )
                .required()
                .max_properties(15),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut data = Payload::new();
        let mut validator = Validator::new(arguments);
        validator
            .required_string(&mut payload, "refund_id")
            .required_map(&mut data, "notes");

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        let refund_id = payload.get_str("refund_id").unwrap_or_default();
        match self.client.refunds().update(refund_id, &data).await {
            Ok(refund) => api_success(&refund),
            Err(err) => Ok(api_failure("updating refund", &err)),
        }
    }
}
