use crate::{
    dto::{EntityDetails, NonFungibleData},
    error::GatewayError,
};

/// Read access to ledger state. Implemented over HTTP by [`crate::GatewayApiClient`].
#[async_trait::async_trait]
pub trait GatewayClient: Send + Sync {
    /// Account state with fungible and non-fungible resources aggregated per vault.
    async fn get_entity_details_vault_aggregated(
        &self,
        address: &str,
    ) -> Result<EntityDetails, GatewayError>;

    /// Data document of a single non-fungible.
    async fn get_non_fungible_data(
        &self,
        resource_address: &str,
        local_id: &str,
    ) -> Result<NonFungibleData, GatewayError>;
}
