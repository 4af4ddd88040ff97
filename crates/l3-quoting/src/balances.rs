use std::{sync::Arc, time::Duration};

use lattic3_gateway::{EntityDetails, GatewayClient, GatewayError};
use lattic3_types::AssetLabel;
use moka::future::Cache;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{catalog::AssetCatalog, prices::QuotedPrices};

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Asset {0} is not in the catalog")]
    UnknownAsset(AssetLabel),
    #[error("No price available for {0}")]
    MissingPrice(AssetLabel),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Failure of an account lookup shared by concurrent callers.
    #[error(transparent)]
    SharedGateway(#[from] Arc<GatewayError>),
}

/// Wallet balances and prices for catalog assets.
#[async_trait::async_trait]
pub trait BalanceResolver: Send + Sync {
    async fn wallet_balance(&self, label: AssetLabel, account: &str)
    -> Result<Decimal, ResolverError>;

    fn price(&self, label: AssetLabel) -> Result<Decimal, ResolverError>;

    /// Forget cached balances of `account`, e.g. after a transaction moved funds.
    async fn invalidate_account(&self, account: &str);
}

/// Reads balances from the gateway and caches the account state they come from.
///
/// Concurrent lookups for one account share a single gateway call.
pub struct GatewayBalanceResolver {
    gateway: Arc<dyn GatewayClient>,
    catalog: Arc<AssetCatalog>,
    prices: Arc<QuotedPrices>,
    accounts: Cache<String, Arc<EntityDetails>>,
}

impl GatewayBalanceResolver {
    pub fn new(
        gateway: Arc<dyn GatewayClient>,
        catalog: Arc<AssetCatalog>,
        prices: Arc<QuotedPrices>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            gateway,
            catalog,
            prices,
            accounts: Cache::builder().time_to_live(cache_ttl).build(),
        }
    }
}

#[async_trait::async_trait]
impl BalanceResolver for GatewayBalanceResolver {
    async fn wallet_balance(
        &self,
        label: AssetLabel,
        account: &str,
    ) -> Result<Decimal, ResolverError> {
        let entry = self
            .catalog
            .get(label)
            .ok_or(ResolverError::UnknownAsset(label))?;

        let details = self
            .accounts
            .try_get_with(account.to_string(), async {
                self.gateway
                    .get_entity_details_vault_aggregated(account)
                    .await
                    .map(Arc::new)
            })
            .await?;

        Ok(details.fungible_balance(&entry.address)?)
    }

    fn price(&self, label: AssetLabel) -> Result<Decimal, ResolverError> {
        self.prices
            .get(label)
            .ok_or(ResolverError::MissingPrice(label))
    }

    async fn invalidate_account(&self, account: &str) {
        self.accounts.invalidate(account).await;
    }
}
