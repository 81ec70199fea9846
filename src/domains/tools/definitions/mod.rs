//! Tool definitions module.
//!
//! One file per Razorpay resource. Each tool is a struct holding the shared
//! [`RazorpayClient`](crate::razorpay::RazorpayClient) and implementing
//! [`ToolHandler`](super::ToolHandler).

mod common;
pub mod orders;
pub mod payment_links;
pub mod payments;
pub mod refunds;

pub use orders::{CreateOrderTool, FetchAllOrdersTool, FetchOrderTool};
pub use payment_links::{CreatePaymentLinkTool, FetchPaymentLinkTool};
pub use payments::FetchPaymentTool;
pub use refunds::{CreateRefundTool, FetchRefundTool, UpdateRefundTool};
