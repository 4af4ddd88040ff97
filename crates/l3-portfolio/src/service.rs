use std::{sync::Arc, time::Duration};

use futures::{StreamExt, TryStreamExt, stream};
use lattic3_gateway::{GatewayClient, NonFungibleGlobalId};
use lattic3_quoting::{BalanceResolver, MarketConfig};
use lattic3_types::{AssetLabel, Side};
use rust_decimal::Decimal;

use crate::{
    decoder::{PositionLookup, lookup_position},
    error::PortfolioError,
    reconciler::reconcile,
    risk::aggregate,
    snapshot::PortfolioSnapshot,
};

/// Runtime knobs of the refresh pipeline.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Wallet balance lookups in flight per side.
    pub balance_concurrency: usize,
    pub balance_cache_ttl: Duration,
    pub gateway_timeout: Duration,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            balance_concurrency: 4,
            balance_cache_ttl: Duration::from_secs(10),
            gateway_timeout: Duration::from_secs(10),
        }
    }
}

/// Runs the decode → reconcile → aggregate pipeline for an account.
///
/// Every call builds a new snapshot from scratch and has no side effect on
/// previously returned ones, so callers decide which result to keep.
#[derive(Clone)]
pub struct PortfolioService {
    gateway: Arc<dyn GatewayClient>,
    resolver: Arc<dyn BalanceResolver>,
    market: Arc<MarketConfig>,
    config: PortfolioConfig,
}

impl PortfolioService {
    pub fn new(
        gateway: Arc<dyn GatewayClient>,
        resolver: Arc<dyn BalanceResolver>,
        market: Arc<MarketConfig>,
        config: PortfolioConfig,
    ) -> Self {
        Self {
            gateway,
            resolver,
            market,
            config,
        }
    }

    pub fn market(&self) -> &MarketConfig {
        &self.market
    }

    pub fn resolver(&self) -> &dyn BalanceResolver {
        self.resolver.as_ref()
    }

    fn badge_address(&self) -> Result<&str, PortfolioError> {
        let address = self.market.borrower_badge_address.trim();
        if address.is_empty() {
            return Err(PortfolioError::Config(
                "Borrower badge address not configured".to_string(),
            ));
        }
        Ok(address)
    }

    /// Rebuild the portfolio snapshot of `account`.
    pub async fn refresh(&self, account: Option<&str>) -> Result<PortfolioSnapshot, PortfolioError> {
        let account = account.ok_or(PortfolioError::NotConnected)?;
        let badge_address = self.badge_address()?;

        tracing::debug!(account = %account, "Refreshing portfolio");

        let (badge, position) =
            match lookup_position(self.gateway.as_ref(), account, badge_address).await? {
                PositionLookup::NoPosition => {
                    tracing::info!(account = %account, "No position badge found");
                    return Ok(PortfolioSnapshot::empty());
                }
                PositionLookup::Open { badge, position } => (badge, position),
            };

        let catalog = &self.market.catalog;
        let concurrency = self.config.balance_concurrency;
        let (supplied, borrowed) = futures::try_join!(
            reconcile(
                position.entries(Side::Supply),
                Side::Supply,
                catalog,
                self.resolver.as_ref(),
                account,
                concurrency,
            ),
            reconcile(
                position.entries(Side::Borrow),
                Side::Borrow,
                catalog,
                self.resolver.as_ref(),
                account,
                concurrency,
            ),
        )?;

        let snapshot = aggregate(badge, supplied, borrowed);

        tracing::debug!(
            account = %account,
            health_ratio = %snapshot.health_ratio.value(),
            net_worth = %snapshot.net_worth,
            supply_apy = %snapshot.supply_apy,
            borrow_apy = %snapshot.borrow_apy,
            net_apy = %snapshot.net_apy,
            "Portfolio refreshed"
        );

        Ok(snapshot)
    }

    /// Current position badge of `account`, read from the ledger rather than from a snapshot.
    pub async fn position_badge(
        &self,
        account: &str,
    ) -> Result<Option<NonFungibleGlobalId>, PortfolioError> {
        let badge_address = self.badge_address()?;
        let details = self
            .gateway
            .get_entity_details_vault_aggregated(account)
            .await?;
        Ok(details.first_non_fungible(badge_address))
    }

    /// Wallet balance of every catalog asset, in catalog order.
    pub async fn wallet_balances(
        &self,
        account: &str,
    ) -> Result<Vec<(AssetLabel, Decimal)>, PortfolioError> {
        let resolver = self.resolver.as_ref();
        let balances: Vec<(AssetLabel, Decimal)> = stream::iter(self.market.catalog.entries())
            .map(|entry| async move {
                let balance = resolver.wallet_balance(entry.label, account).await?;
                Ok::<_, PortfolioError>((entry.label, balance))
            })
            .buffered(self.config.balance_concurrency.max(1))
            .try_collect()
            .await?;
        Ok(balances)
    }
}
