pub mod controller;
pub mod display;
pub mod error;
pub mod market;
pub mod notification;
pub mod selection;
pub mod state;
pub mod transaction;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Command, CompletedRefresh, PendingRefresh, PortfolioController};
pub use display::{format_health, format_pct, format_usd};
pub use error::{AmountError, ControllerError, PreviewError, TransactionError, WalletError};
pub use market::MarketRow;
pub use notification::{Notification, NotificationLevel};
pub use selection::{SelectionPhase, SideSelection};
pub use state::{RefreshOutput, RefreshTicket, ViewState};
pub use transaction::{
    AssetAmount, MANIFEST_VERSION, ManifestBuilder, OpenPositionArgs, PositionArgs,
    TransactionReceipt, WalletClient, build_manifest,
};
pub use validation::validate_amount;
