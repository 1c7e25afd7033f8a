pub mod client;

pub use client::GatewayClient;
pub use pagegate_api;
