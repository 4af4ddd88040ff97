use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use lattic3_gateway::{
    EntityDetails, FungibleResource, FungibleResources, FungibleVault, FungibleVaults,
    GatewayClient, GatewayError, MapEntry, NonFungibleData, NonFungibleResource,
    NonFungibleResources, NonFungibleVault, NonFungibleVaults, ProgrammaticField,
    ProgrammaticJson, ScalarValue,
};
use lattic3_quoting::{AssetCatalog, AssetCatalogEntry, MarketConfig};
use lattic3_types::AssetLabel;
use rust_decimal::{Decimal, dec};

use crate::{
    error::WalletError,
    transaction::{
        AssetAmount, ManifestBuilder, OpenPositionArgs, PositionArgs, TransactionReceipt,
        WalletClient,
    },
};

pub(crate) const ACCOUNT: &str = "account_tdx_2_1test";
pub(crate) const BADGE: &str = "resource_badge";

fn entry(label: AssetLabel, address: &str, price: Decimal, apy_supply: Decimal, apy_borrow: Decimal) -> AssetCatalogEntry {
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

fn map_field(name: &str, entries: &[(&str, &str)]) -> ProgrammaticField {
    let scalar = |kind: &str, value: &str| ScalarValue {
        kind: kind.to_string(),
        value: value.to_string(),
    };
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

/// Ledger holding 500 XRD and 20 USDC for every account, plus an optional badge.
pub(crate) struct FakeGateway {
    badge: Option<NonFungibleData>,
    pub(crate) detail_calls: AtomicUsize,
}

impl FakeGateway {
    pub(crate) const fn without_badge() -> Self {
        Self {
            badge: None,
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_badge(data: NonFungibleData) -> Self {
        Self {
            badge: Some(data),
            detail_calls: AtomicUsize::new(0),
        }
    }
}

fn fungible(address: &str, amount: &str) -> FungibleResource {
    FungibleResource {
        resource_address: address.to_string(),
        vaults: FungibleVaults {
            items: vec![FungibleVault {
                vault_address: format!("internal_vault_{address}"),
                amount: amount.to_string(),
            }],
        },
    }
}

#[async_trait::async_trait]
impl GatewayClient for FakeGateway {
    async fn get_entity_details_vault_aggregated(
        &self,
        address: &str,
    ) -> Result<EntityDetails, GatewayError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let non_fungibles = self
            .badge
            .as_ref()
            .map(|_| NonFungibleResource {
                resource_address: BADGE.to_string(),
                vaults: NonFungibleVaults {
                    items: vec![NonFungibleVault {
                        vault_address: "internal_vault_badge".to_string(),
                        total_count: 1,
                        items: vec!["#1#".to_string()],
                    }],
                },
            })
            .into_iter()
            .collect();

        Ok(EntityDetails {
            address: address.to_string(),
            fungible_resources: FungibleResources {
                items: vec![fungible("resource_xrd", "500"), fungible("resource_usdc", "20")],
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

/// Renders manifests as one-line summaries so tests can assert on them.
pub(crate) struct RecordingManifests;

fn assets_line(assets: &[AssetAmount]) -> String {
    assets
        .iter()
        .map(|asset| format!("{}:{}", asset.address, asset.amount))
        .collect::<Vec<_>>()
        .join(" ")
}

impl ManifestBuilder for RecordingManifests {
    fn open_position(&self, args: &OpenPositionArgs<'_>) -> String {
        format!(
            "open_position {} {} {}",
            args.component,
            args.account,
            assets_line(args.assets)
        )
    }

    fn position_supply(&self, args: &PositionArgs<'_>) -> String {
        format!(
            "position_supply {} {} {}:{} {}",
            args.component,
            args.account,
            args.badge.resource_address,
            args.badge.local_id,
            assets_line(args.assets)
        )
    }

    fn position_borrow(&self, args: &PositionArgs<'_>) -> String {
        format!(
            "position_borrow {} {} {}:{} {}",
            args.component,
            args.account,
            args.badge.resource_address,
            args.badge.local_id,
            assets_line(args.assets)
        )
    }
}

#[derive(Default)]
pub(crate) struct FakeWallet {
    pub(crate) sent: Mutex<Vec<(String, u32)>>,
    rejecting: bool,
}

impl FakeWallet {
    pub(crate) fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Default::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<(String, u32)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl WalletClient for FakeWallet {
    async fn send_transaction(
        &self,
        manifest: &str,
        version: u32,
    ) -> Result<TransactionReceipt, WalletError> {
        self.sent.lock().unwrap().push((manifest.to_string(), version));
        if self.rejecting {
            return Err(WalletError::Rejected("user declined".to_string()));
        }
        Ok(TransactionReceipt {
            transaction_intent_hash: "txid_tdx_2_1test".to_string(),
        })
    }
}
