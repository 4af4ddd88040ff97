use lattic3_gateway::GatewayError;
use lattic3_quoting::ResolverError;
use lattic3_types::Side;

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Wallet not connected")]
    NotConnected,
    #[error("Invalid {side} amount '{value}' for resource {resource_address}")]
    InvalidAmount {
        side: Side,
        resource_address: String,
        value: String,
    },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}
