//! Business logic. The only domain is `tools`: the Razorpay operations
//! exposed to MCP clients.

pub mod tools;
