pub mod client;
pub mod dto;
pub mod error;
pub mod traits;

pub use client::GatewayApiClient;
pub use error::GatewayError;
pub use traits::GatewayClient;

pub use dto::*;
