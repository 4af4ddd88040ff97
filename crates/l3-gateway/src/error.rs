use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Internal server error")]
    InternalServerError,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid gateway url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Entity {0} not found in gateway response")]
    EntityNotFound(String),

    #[error("Non-fungible {local_id} of {resource_address} has no data")]
    NonFungibleNotFound {
        resource_address: String,
        local_id: String,
    },

    #[error("Invalid amount '{value}' for resource {resource_address}")]
    InvalidAmount {
        resource_address: String,
        value: String,
    },
}
