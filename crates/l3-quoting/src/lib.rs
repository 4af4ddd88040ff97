mod balances;
mod catalog;
mod prices;

pub use balances::{BalanceResolver, GatewayBalanceResolver, ResolverError};
pub use catalog::{AssetCatalog, AssetCatalogEntry, CatalogError, MarketConfig};
pub use prices::QuotedPrices;
