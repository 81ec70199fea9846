//! Razorpay REST API client.

mod client;
mod error;

pub use client::{Payments, RazorpayClient, Resource};
pub use error::RazorpayError;
