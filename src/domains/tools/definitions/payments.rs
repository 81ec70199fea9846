//! Payment tools: `fetch_payment`.

use std::sync::Arc;

use super::common::{api_failure, api_success};
use crate::domains::tools::{
    ArgumentBag, Payload, ToolError, ToolHandler, ToolParameter, ToolResult, Validator,
};
use crate::razorpay::RazorpayClient;

/// Fetches one payment by id.
#[derive(Debug, Clone)]
pub struct FetchPaymentTool {
    client: Arc<RazorpayClient>,
}

impl FetchPaymentTool {
    pub const NAME: &'static str = "fetch_payment";
    pub const DESCRIPTION: &'static str =
        "Use this tool to retrieve the details of a specific payment using its id. \
         Amount returned is in paisa";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for FetchPaymentTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::string("payment_id")
                .description("Unique identifier of the payment to be retrieved. ID should have a pay_ prefix.")
                .required(),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut validator = Validator::new(arguments);
        validator.required_string(&mut payload, "payment_id");

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        let payment_id = payload.get_str("payment_id").unwrap_or_default();
        match self.client.payments().fetch(payment_id).await {
            Ok(payment) => api_success(&payment),
            Err(err) => Ok(api_failure("fetching payment", &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::test_support::{bad_request, bag, client, offline_client, parse};
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_payment() {
        let server = MockServer::start().await;
        let response = json!({
            "id": "pay_MT48CvBhIC98MQ",
            "amount": 1000,
            "currency": "INR",
            "status": "captured"
        });
        Mock::given(method("GET"))
            .and(path("/v1/payments/pay_MT48CvBhIC98MQ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .expect(1)
            .mount(&server)
            .await;

        let tool = FetchPaymentTool::new(client(&server));
        let result = tool
            .handle(&bag(json!({ "payment_id": "pay_MT48CvBhIC98MQ" })))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(parse(&result.text), response);
    }

    #[tokio::test]
    async fn test_fetch_payment_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/payments/pay_invalid"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(bad_request("The id provided does not exist")),
            )
            .mount(&server)
            .await;

        let tool = FetchPaymentTool::new(client(&server));
        let result = tool
            .handle(&bag(json!({ "payment_id": "pay_invalid" })))
            .await
            .unwrap();

        assert!(result.is_error);
        assert_eq!(
            result.text,
            "fetching payment failed: The id provided does not exist"
        );
    }

    #[tokio::test]
    async fn test_fetch_payment_wrong_type() {
        let tool = FetchPaymentTool::new(offline_client());
        let result = tool
            .handle(&bag(json!({ "payment_id": 12345 })))
            .await
            .unwrap();
        assert_eq!(
            result.text,
            "Validation errors:\n- invalid parameter type: payment_id"
        );
    }
}
