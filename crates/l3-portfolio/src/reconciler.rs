use futures::{StreamExt, TryStreamExt, stream};
use lattic3_quoting::{AssetCatalog, AssetCatalogEntry, BalanceResolver};
use lattic3_types::{AssetLabel, Side};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{decoder::RawPositionEntry, error::PortfolioError};

/// A position entry joined with its catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuedAsset {
    pub address: String,
    pub label: AssetLabel,
    pub wallet_balance: Decimal,
    /// Amount held in the position for this asset.
    pub selected_amount: Decimal,
    pub apy: Decimal,
    /// Price the entry was valued at.
    pub price: Decimal,
    pub pool_unit_address: String,
    pub side: Side,
}

impl ValuedAsset {
    pub fn value(&self) -> Decimal {
        self.selected_amount * self.price
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledSide {
    pub assets: Vec<ValuedAsset>,
    pub total_value: Decimal,
}

/// Join raw entries of one side against the catalog.
///
/// Entries whose address isn't in the catalog are skipped. Wallet balances are
/// fetched with at most `concurrency` lookups in flight; output keeps input order.
/// The first failing lookup fails the whole side.
pub async fn reconcile(
    entries: &[RawPositionEntry],
    side: Side,
    catalog: &AssetCatalog,
    resolver: &dyn BalanceResolver,
    account: &str,
    concurrency: usize,
) -> Result<ReconciledSide, PortfolioError> {
    let mut matched: Vec<(&RawPositionEntry, &AssetCatalogEntry, Decimal)> =
        Vec::with_capacity(entries.len());
    let mut total_value = Decimal::ZERO;

    for raw in entries {
        let Some(asset) = catalog.by_address(&raw.resource_address) else {
            tracing::debug!(
                side = %side,
                resource_address = %raw.resource_address,
                "Dropping position entry for unknown asset"
            );
            continue;
        };

        let price = resolver.price(asset.label)?;
        total_value += raw.amount * price;
        matched.push((raw, asset, price));
    }

    let assets: Vec<ValuedAsset> = stream::iter(matched)
        .map(|(raw, asset, price)| async move {
            let wallet_balance = resolver.wallet_balance(asset.label, account).await?;

            Ok::<_, PortfolioError>(ValuedAsset {
                address: raw.resource_address.clone(),
                label: asset.label,
                wallet_balance,
                selected_amount: raw.amount,
                apy: asset.apy(side),
                price,
                pool_unit_address: asset.pool_unit_address.clone(),
                side,
            })
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    Ok(ReconciledSide {
        assets,
        total_value,
    })
}

#[cfg(test)]
mod tests {
    use std::{sync::atomic::Ordering, time::Duration};

    use rust_decimal::dec;

    use super::*;
    use crate::testing::{ACCOUNT, FakeResolver, catalog};

    fn raw(address: &str, amount: Decimal) -> RawPositionEntry {
        RawPositionEntry {
            resource_address: address.to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_unknown_assets_are_filtered_out() {
        let resolver = FakeResolver::new();
        let entries = vec![
            raw("resource_xrd", dec!(100)),
            raw("resource_deprecated", dec!(1_000_000)),
        ];

        let side = reconcile(&entries, Side::Supply, &catalog(), &resolver, ACCOUNT, 4)
            .await
            .unwrap();

        assert_eq!(side.assets.len(), 1);
        assert_eq!(side.assets[0].label, AssetLabel::Xrd);
        assert_eq!(side.total_value, dec!(100));
        assert_eq!(resolver.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_output_keeps_input_order() {
        // The first entry resolves last.
        let resolver = FakeResolver::new()
            .with_delay(AssetLabel::Xrd, Duration::from_millis(30))
            .with_delay(AssetLabel::Usdc, Duration::from_millis(10));
        let entries = vec![
            raw("resource_xrd", dec!(1)),
            raw("resource_usdc", dec!(2)),
            raw("resource_usdt", dec!(3)),
        ];

        let side = reconcile(&entries, Side::Borrow, &catalog(), &resolver, ACCOUNT, 3)
            .await
            .unwrap();

        let labels: Vec<_> = side.assets.iter().map(|a| a.label).collect();
        assert_eq!(
            labels,
            vec![AssetLabel::Xrd, AssetLabel::Usdc, AssetLabel::Usdt]
        );
        // 1*1 + 2*2 + 3*1
        assert_eq!(side.total_value, dec!(8));
        assert_eq!(side.assets[1].apy, dec!(10));
        assert_eq!(side.assets[1].wallet_balance, dec!(20));
        assert_eq!(side.assets[1].pool_unit_address, "resource_usdc_unit");
    }

    #[tokio::test]
    async fn test_empty_side_has_zero_total() {
        let resolver = FakeResolver::new();
        let side = reconcile(&[], Side::Supply, &catalog(), &resolver, ACCOUNT, 4)
            .await
            .unwrap();
        assert_eq!(side, ReconciledSide::default());
    }

    #[tokio::test]
    async fn test_failed_balance_lookup_fails_side() {
        let resolver = FakeResolver::new().failing_on(AssetLabel::Usdc);
        let entries = vec![raw("resource_xrd", dec!(1)), raw("resource_usdc", dec!(2))];

        let result = reconcile(&entries, Side::Supply, &catalog(), &resolver, ACCOUNT, 1).await;
        assert!(matches!(result, Err(PortfolioError::Resolver(_))));
    }
}
