use std::{collections::HashMap, path::Path};

use lattic3_types::{AssetLabel, Side};
use rust_decimal::{Decimal, dec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Resource address {0} is configured for more than one asset")]
    DuplicateAddress(String),
    #[error("Asset {0} is configured more than once")]
    DuplicateLabel(AssetLabel),
    #[error("Asset {0} has a negative price")]
    NegativePrice(AssetLabel),
    #[error("Cannot read market config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid market config: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_available() -> Decimal {
    dec!(100)
}

/// Static description of a supported asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalogEntry {
    pub label: AssetLabel,
    /// On-chain resource address.
    pub address: String,
    pub pool_unit_address: String,
    /// USD price used for valuation.
    pub price: Decimal,
    /// Percent, e.g. `5` for 5%.
    pub apy_supply: Decimal,
    pub apy_borrow: Decimal,
    /// Borrowable amount shown in the borrow table.
    #[serde(default = "default_available")]
    pub available: Decimal,
}

impl AssetCatalogEntry {
    pub const fn apy(&self, side: Side) -> Decimal {
        match side {
            Side::Supply => self.apy_supply,
            Side::Borrow => self.apy_borrow,
        }
    }
}

/// Lookup table of the supported assets, indexed by label and by resource address.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Vec<AssetCatalogEntry>")]
pub struct AssetCatalog {
    entries: Vec<AssetCatalogEntry>,
    by_address: HashMap<String, usize>,
    by_label: HashMap<AssetLabel, usize>,
}

impl AssetCatalog {
    pub fn new(entries: Vec<AssetCatalogEntry>) -> Result<Self, CatalogError> {
        let mut by_address = HashMap::with_capacity(entries.len());
        let mut by_label = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(entry.label));
            }
            if by_address.insert(entry.address.clone(), index).is_some() {
                return Err(CatalogError::DuplicateAddress(entry.address.clone()));
            }
            if by_label.insert(entry.label, index).is_some() {
                return Err(CatalogError::DuplicateLabel(entry.label));
            }
        }

        Ok(Self {
            entries,
            by_address,
            by_label,
        })
    }

    pub fn by_address(&self, address: &str) -> Option<&AssetCatalogEntry> {
        self.by_address.get(address).map(|i| &self.entries[*i])
    }

    pub fn get(&self, label: AssetLabel) -> Option<&AssetCatalogEntry> {
        self.by_label.get(&label).map(|i| &self.entries[*i])
    }

    /// Entries in configuration order.
    pub fn entries(&self) -> &[AssetCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<AssetCatalogEntry>> for AssetCatalog {
    type Error = CatalogError;

    fn try_from(entries: Vec<AssetCatalogEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

/// Market configuration, loaded once at start and read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub market_component: String,
    /// Resource address of the position badge.
    #[serde(default)]
    pub borrower_badge_address: String,
    #[serde(rename = "assets")]
    pub catalog: AssetCatalog,
}

impl MarketConfig {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
