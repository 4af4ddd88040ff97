use lattic3_quoting::{AssetCatalog, AssetCatalogEntry};
use lattic3_types::{AssetLabel, Side};
use rust_decimal::Decimal;
use serde::Serialize;

/// One row of the market tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketRow {
    pub label: AssetLabel,
    pub address: String,
    pub pool_unit_address: String,
    /// `None` until the first successful refresh of a connected wallet.
    pub wallet_balance: Option<Decimal>,
    pub available: Decimal,
    pub price: Decimal,
    pub apy_supply: Decimal,
    pub apy_borrow: Decimal,
}

impl MarketRow {
    pub fn from_entry(entry: &AssetCatalogEntry) -> Self {
        Self {
            label: entry.label,
            address: entry.address.clone(),
            pool_unit_address: entry.pool_unit_address.clone(),
            wallet_balance: None,
            available: entry.available,
            price: entry.price,
            apy_supply: entry.apy_supply,
            apy_borrow: entry.apy_borrow,
        }
    }

    /// Rows for every catalog asset, in catalog order.
    pub fn from_catalog(catalog: &AssetCatalog) -> Vec<Self> {
        catalog.entries().iter().map(Self::from_entry).collect()
    }

    /// Largest amount the user may enter on `side`: the wallet balance when
    /// supplying, the market liquidity when borrowing.
    pub fn max_for(&self, side: Side) -> Decimal {
        match side {
            Side::Supply => self.wallet_balance.unwrap_or_default(),
            Side::Borrow => self.available,
        }
    }

    pub const fn apy(&self, side: Side) -> Decimal {
        match side {
            Side::Supply => self.apy_supply,
            Side::Borrow => self.apy_borrow,
        }
    }

    pub fn usd_value(&self, amount: Decimal) -> Decimal {
        amount * self.price
    }
}
