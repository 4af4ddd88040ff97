use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use lattic3_gateway::{
    EntityDetails, FungibleResource, FungibleResources, FungibleVault, FungibleVaults,
    GatewayClient, GatewayError, MapEntry, NonFungibleData, NonFungibleResource,
    NonFungibleResources, NonFungibleVault, NonFungibleVaults, ProgrammaticField,
    ProgrammaticJson, ScalarValue,
};
use lattic3_quoting::{
    AssetCatalog, AssetCatalogEntry, BalanceResolver, MarketConfig, QuotedPrices, ResolverError,
};
use lattic3_types::AssetLabel;
use rust_decimal::{Decimal, dec};

pub(crate) const ACCOUNT: &str = "account_tdx_2_1test";
pub(crate) const BADGE: &str = "resource_badge";

fn entry(
    label: AssetLabel,
    address: &str,
    price: Decimal,
    apy_supply: Decimal,
    apy_borrow: Decimal,
) -> AssetCatalogEntry {
    AssetCatalogEntry {
        label,
        address: address.to_string(),
        pool_unit_address: format!("{address}_unit"),
        price,
        apy_supply,
        apy_borrow,
        available: dec!(100),
    }
}

pub(crate) fn catalog() -> AssetCatalog {
    AssetCatalog::new(vec![
        entry(AssetLabel::Xrd, "resource_xrd", dec!(1), dec!(5), dec!(8)),
        entry(AssetLabel::Usdc, "resource_usdc", dec!(2), dec!(3), dec!(10)),
        entry(AssetLabel::Usdt, "resource_usdt", dec!(1), dec!(4), dec!(6)),
    ])
    .unwrap()
}

pub(crate) fn market() -> MarketConfig {
    MarketConfig {
        market_component: "component_market".to_string(),
        borrower_badge_address: BADGE.to_string(),
        catalog: catalog(),
    }
}

fn scalar(kind: &str, value: &str) -> ScalarValue {
    ScalarValue {
        kind: kind.to_string(),
        value: value.to_string(),
    }
}

fn map_field(name: &str, entries: &[(&str, &str)]) -> ProgrammaticField {
    ProgrammaticField {
        kind: "Map".to_string(),
        field_name: Some(name.to_string()),
        entries: entries
            .iter()
            .map(|(address, amount)| MapEntry {
                key: scalar("Reference", address),
                value: scalar("Decimal", amount),
            })
            .collect(),
    }
}

pub(crate) fn badge_data(supply: &[(&str, &str)], borrow: &[(&str, &str)]) -> NonFungibleData {
    NonFungibleData {
        programmatic_json: ProgrammaticJson {
            kind: "Tuple".to_string(),
            fields: vec![map_field("supply", supply), map_field("borrow", borrow)],
        },
    }
}

pub(crate) struct FakeGateway {
    badge: Option<NonFungibleData>,
}

impl FakeGateway {
    pub(crate) const fn without_badge() -> Self {
        Self {
            badge: None,
        }
    }

    pub(crate) fn with_badge(data: NonFungibleData) -> Self {
        Self {
            badge: Some(data),
        }
    }
}

#[async_trait::async_trait]
impl GatewayClient for FakeGateway {
    async fn get_entity_details_vault_aggregated(
        &self,
        address: &str,
    ) -> Result<EntityDetails, GatewayError> {
        let non_fungibles = if self.badge.is_some() {
            vec![NonFungibleResource {
                resource_address: BADGE.to_string(),
                vaults: NonFungibleVaults {
                    items: vec![NonFungibleVault {
                        vault_address: "internal_vault_badge".to_string(),
                        total_count: 1,
                        items: vec!["#1#".to_string()],
                    }],
                },
            }]
        } else {
            Vec::new()
        };

        Ok(EntityDetails {
            address: address.to_string(),
            fungible_resources: FungibleResources {
                items: vec![FungibleResource {
                    resource_address: "resource_xrd".to_string(),
                    vaults: FungibleVaults {
                        items: vec![FungibleVault {
                            vault_address: "internal_vault_xrd".to_string(),
                            amount: "500".to_string(),
                        }],
                    },
                }],
            },
            non_fungible_resources: NonFungibleResources {
                items: non_fungibles,
            },
        })
    }

    async fn get_non_fungible_data(
        &self,
        resource_address: &str,
        local_id: &str,
    ) -> Result<NonFungibleData, GatewayError> {
        self.badge
            .clone()
            .ok_or_else(|| GatewayError::NonFungibleNotFound {
                resource_address: resource_address.to_string(),
                local_id: local_id.to_string(),
            })
    }
}

/// Resolver with fixed balances. Per-asset delays let tests finish lookups out of order.
#[derive(Default)]
pub(crate) struct FakeResolver {
    prices: QuotedPrices,
    balances: HashMap<AssetLabel, Decimal>,
    delays: HashMap<AssetLabel, Duration>,
    failing: Option<AssetLabel>,
    pub(crate) lookups: AtomicUsize,
}

impl FakeResolver {
    pub(crate) fn new() -> Self {
        Self {
            prices: QuotedPrices::from_catalog(&catalog()),
            balances: HashMap::from([
                (AssetLabel::Xrd, dec!(500)),
                (AssetLabel::Usdc, dec!(20)),
                (AssetLabel::Usdt, dec!(7)),
            ]),
            ..Default::default()
        }
    }

    pub(crate) fn with_delay(mut self, label: AssetLabel, delay: Duration) -> Self {
        self.delays.insert(label, delay);
        self
    }

    pub(crate) fn failing_on(mut self, label: AssetLabel) -> Self {
        self.failing = Some(label);
        self
    }
}

#[async_trait::async_trait]
impl BalanceResolver for FakeResolver {
    async fn wallet_balance(
        &self,
        label: AssetLabel,
        _account: &str,
    ) -> Result<Decimal, ResolverError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&label) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing == Some(label) {
            return Err(GatewayError::InternalServerError.into());
        }
        Ok(self.balances.get(&label).copied().unwrap_or_default())
    }

    fn price(&self, label: AssetLabel) -> Result<Decimal, ResolverError> {
        self.prices
            .get(label)
            .ok_or(ResolverError::MissingPrice(label))
    }

    async fn invalidate_account(&self, _account: &str) {}
}
