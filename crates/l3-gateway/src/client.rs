use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    dto::{
        EntityDetails, EntityDetailsRequest, EntityDetailsResponse,
        NonFungibleData, NonFungibleDataRequest, NonFungibleDataResponse,
    },
    error::GatewayError,
    traits::GatewayClient,
};

pub struct GatewayApiClient {
    http_client: Client,
    api_endpoint: Url,
}

impl GatewayApiClient {
    pub fn new(api_endpoint: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = http_client(timeout)?;

        // `Url::join` drops the last path segment unless the base ends with a slash.
        let api_endpoint = if api_endpoint.ends_with('/') {
            Url::parse(api_endpoint)?
        } else {
            Url::parse(&format!("{api_endpoint}/"))?
        };

        Ok(Self {
            http_client,
            api_endpoint,
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.api_endpoint.join(path)?;
        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<R>().await?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl GatewayClient for GatewayApiClient {
    async fn get_entity_details_vault_aggregated(
        &self,
        address: &str,
    ) -> Result<EntityDetails, GatewayError> {
        let request = EntityDetailsRequest::vault_aggregated(address);
        let response: EntityDetailsResponse = self.post("state/entity/details", &request).await?;

        response
            .items
            .into_iter()
            .find(|item| item.address == address)
            .ok_or_else(|| GatewayError::EntityNotFound(address.to_string()))
    }

    async fn get_non_fungible_data(
        &self,
        resource_address: &str,
        local_id: &str,
    ) -> Result<NonFungibleData, GatewayError> {
        let request = NonFungibleDataRequest {
            resource_address: resource_address.to_string(),
            non_fungible_ids: vec![local_id.to_string()],
        };
        let response: NonFungibleDataResponse =
            self.post("state/non-fungible/data", &request).await?;

        response
            .non_fungible_ids
            .into_iter()
            .find(|item| item.non_fungible_id == local_id && !item.is_burned)
            .and_then(|item| item.data)
            .ok_or_else(|| GatewayError::NonFungibleNotFound {
                resource_address: resource_address.to_string(),
                local_id: local_id.to_string(),
            })
    }
}

pub fn http_client(timeout: Duration) -> Result<Client, GatewayError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        GatewayError::InternalServerError
    })
}
