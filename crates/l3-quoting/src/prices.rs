use dashmap::DashMap;
use lattic3_types::AssetLabel;
use rust_decimal::Decimal;

use crate::catalog::AssetCatalog;

/// USD prices per asset. Seeded from the catalog and overridable with live quotes.
#[derive(Clone, Default, Debug)]
pub struct QuotedPrices(DashMap<AssetLabel, Decimal>);

impl QuotedPrices {
    pub fn from_catalog(catalog: &AssetCatalog) -> Self {
        let prices = Self::default();
        for entry in catalog.entries() {
            prices.0.insert(entry.label, entry.price);
        }
        prices
    }

    pub fn get(&self, label: AssetLabel) -> Option<Decimal> {
        self.0.get(&label).map(|v| *v.value())
    }

    /// Negative quotes are ignored and return `None`.
    pub fn insert(&self, label: AssetLabel, price: Decimal) -> Option<Decimal> {
        if price.is_sign_negative() {
            return None;
        }
        self.0.insert(label, price)
    }
}

impl From<Vec<(AssetLabel, Decimal)>> for QuotedPrices {
    fn from(pairs: Vec<(AssetLabel, Decimal)>) -> Self {
        let prices = Self::default();
        for (label, price) in pairs {
            prices.insert(label, price);
        }
        prices
    }
}
