//! Payment link tools: `create_payment_link`, `fetch_payment_link`.

use std::sync::Arc;

use super::common::{api_failure, api_success};
use crate::domains::tools::{
    ArgumentBag, Payload, ToolError, ToolHandler, ToolParameter, ToolResult, Validator,
};
use crate::razorpay::RazorpayClient;

#[derive(Debug, Clone)]
pub struct CreatePaymentLinkTool {
    client: Arc<RazorpayClient>,
}

impl CreatePaymentLinkTool {
    pub const NAME: &'static str = "create_payment_link";
    pub const DESCRIPTION: &'static str =
        "Create a new payment link in Razorpay with a specified amount";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreatePaymentLinkTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::number("amount")
                .description("Amount to be paid using the link in smallest currency unit (e.g., ₹300, use 30000)")
                .required(),
            ToolParameter::string("currency")
                .description("Three-letter ISO code for the currency (e.g., INR)")
                .required(),
            ToolParameter::string("description").description(
                "A brief description of the Payment Link explaining the intent of the payment.",
            ),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut validator = Validator::new(arguments);
        validator
            .required_float(&mut payload, "amount")
            .required_string(&mut payload, "currency")
            .optional_string(&mut payload, "description");

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        match self.client.payment_links().create(&payload).await {
            Ok(link) => api_success(&link),
            Err(err) => Ok(api_failure("creating payment link", &err)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchPaymentLinkTool {
    client: Arc<RazorpayClient>,
}

impl FetchPaymentLinkTool {
    pub const NAME: &'static str = "fetch_payment_link";
    pub const DESCRIPTION: &'static str = "Fetch payment link details using it's ID. \
         Response contains the basic details like amount, status etc";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for FetchPaymentLinkTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::string("payment_link_id")
                .description("ID of the payment link to be fetched (ID should have a plink_ prefix).")
                .required(),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut validator = Validator::new(arguments);
        validator.required_string(&mut payload, "payment_link_id");

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        let link_id = payload.get_str("payment_link_id").unwrap_or_default();
        match self
            .client
            .payment_links()
            .fetch(link_id, &Payload::new())
            .await
        {
            Ok(link) => api_success(&link),
            Err(err) => Ok(api_failure("fetching payment link", &err)),
        }
    }
}
