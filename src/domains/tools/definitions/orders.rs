//! Order tools: `create_order`, `fetch_order`, `fetch_all_orders`.

use std::sync::Arc;

use tracing::info;

use super::common::{api_failure, api_success};
use crate::domains::tools::{
    ArgumentBag, Payload, ToolError, ToolHandler, ToolParameter, ToolResult, Validator,
};
use crate::razorpay::RazorpayClient;

/// Creates a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderTool {
    client: Arc<RazorpayClient>,
}

impl CreateOrderTool {
    pub const NAME: &'static str = "create_order";
    pub const DESCRIPTION: &'static str = "Create a new order in Razorpay";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateOrderTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::number("amount")
                .description(
                    "Payment amount in the smallest currency sub-unit (e.g., for ₹295, use 29500)",
                )
                .required()
                .min(100.0),
            ToolParameter::string("currency")
                .description("ISO code for the currency (e.g., INR, USD, SGD)")
                .required()
                .pattern("^[A-Z]{3}$"),
            ToolParameter::string("receipt")
                .description("Receipt number for internal reference (max 40 chars, must be unique)")
                .max(40.0),
            ToolParameter::object("notes")
                .description("Key-value pairs for additional information (max 15 pairs, 256 chars each)")
                .max_properties(15),
            ToolParameter::boolean("partial_payment")
                .description("Whether the customer can make partial payments")
                .default_value(false),
            ToolParameter::number("first_payment_min_amount")
                .description("Minimum amount for first partial payment (only if partial_payment is true)")
                .min(100.0),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut validator = Validator::new(arguments);
        validator
            .required_float(&mut payload, "amount")
            .required_string(&mut payload, "currency")
            .optional_string(&mut payload, "receipt")
            .optional_map(&mut payload, "notes")
            .optional_bool(&mut payload, "partial_payment");

        if payload.get_bool("partial_payment") == Some(true) {
            validator.optional_float(&mut payload, "first_payment_min_amount");
        }

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        match self.client.orders().create(&payload).await {
            Ok(order) => {
                info!("Created order {}", order["id"]);
                api_success(&order)
            }
            Err(err) => Ok(api_failure("creating order", &err)),
        }
    }
}

/// Fetches one order by id.
#[derive(Debug, Clone)]
pub struct FetchOrderTool {
    client: Arc<RazorpayClient>,
}

impl FetchOrderTool {
    pub const NAME: &'static str = "fetch_order";
    pub const DESCRIPTION: &'static str = "Fetch an order's details using its ID";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for FetchOrderTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::string("order_id")
                .description("Unique identifier of the order to be retrieved")
                .required(),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut payload = Payload::new();
        let mut validator = Validator::new(arguments);
        validator.required_string(&mut payload, "order_id");

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        let order_id = payload.get_str("order_id").unwrap_or_default();
        match self.client.orders().fetch(order_id, &Payload::new()).await {
            Ok(order) => api_success(&order),
            Err(err) => Ok(api_failure("fetching order", &err)),
        }
    }
}

/// Lists orders with filters and pagination.
#[derive(Debug, Clone)]
pub struct FetchAllOrdersTool {
    client: Arc<RazorpayClient>,
}

impl FetchAllOrdersTool {
    pub const NAME: &'static str = "fetch_all_orders";
    pub const DESCRIPTION: &'static str = "Fetch all orders with optional filtering and pagination";

    pub fn new(client: Arc<RazorpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ToolHandler for FetchAllOrdersTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::integer("count")
                .description("Number of orders to be fetched (default: 10, max: 100)")
                .min(1.0)
                .max(100.0),
            ToolParameter::integer("skip")
                .description("Number of orders to be skipped (default: 0)")
                .min(0.0),
            ToolParameter::integer("from")
                .description("Timestamp (in Unix format) from when the orders should be fetched")
                .min(0.0),
            ToolParameter::integer("to")
                .description("Timestamp (in Unix format) up till when orders are to be fetched")
                .min(0.0),
            ToolParameter::integer("authorized")
                .description(
                    "Filter orders based on payment authorization status. \
                     Values: 0 (orders with unauthorized payments), \
                     1 (orders with authorized payments)",
                )
                .min(0.0)
                .max(1.0),
            ToolParameter::string("receipt")
                .description("Filter orders that contain the provided value for receipt"),
            ToolParameter::string_list("expand").description(
                "Used to retrieve additional information. \
                 Supported values: payments, payments.card, transfers, virtual_account",
            ),
        ]
    }

    async fn handle(&self, arguments: &ArgumentBag) -> Result<ToolResult, ToolError> {
        let mut query = Payload::new();
        let mut validator = Validator::new(arguments);
        validator
            .pagination(&mut query)
            .optional_int(&mut query, "from")
            .optional_int(&mut query, "to")
            .optional_int(&mut query, "authorized")
            .optional_string(&mut query, "receipt")
            .optional_array(&mut query, "expand")
            .expand(&mut query);

        if let Some(result) = validator.handle_errors() {
            return Ok(result);
        }

        match self.client.orders().all(&query).await {
            Ok(orders) => api_success(&orders),
            Err(err) => Ok(api_failure("fetching orders", &err)),
        }
    }
}
