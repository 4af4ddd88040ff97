use lattic3_gateway::NonFungibleGlobalId;
use lattic3_types::Side;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{TransactionError, WalletError};

/// Manifest format version handed to the wallet.
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetAmount {
    pub address: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct OpenPositionArgs<'a> {
    pub component: &'a str,
    pub account: &'a str,
    pub assets: &'a [AssetAmount],
}

#[derive(Debug, Clone, Copy)]
pub struct PositionArgs<'a> {
    pub component: &'a str,
    pub account: &'a str,
    pub badge: &'a NonFungibleGlobalId,
    pub assets: &'a [AssetAmount],
}

/// Renders transaction manifests for the lending component.
pub trait ManifestBuilder: Send + Sync {
    fn open_position(&self, args: &OpenPositionArgs<'_>) -> String;
    fn position_supply(&self, args: &PositionArgs<'_>) -> String;
    fn position_borrow(&self, args: &PositionArgs<'_>) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionReceipt {
    pub transaction_intent_hash: String,
}

#[async_trait::async_trait]
pub trait WalletClient: Send + Sync {
    async fn send_transaction(
        &self,
        manifest: &str,
        version: u32,
    ) -> Result<TransactionReceipt, WalletError>;
}

/// Pick and render the manifest for a confirmed selection.
///
/// Supplying without a badge opens a new position. Borrowing always needs one.
pub fn build_manifest(
    builder: &dyn ManifestBuilder,
    side: Side,
    component: &str,
    account: &str,
    badge: Option<&NonFungibleGlobalId>,
    assets: &[AssetAmount],
) -> Result<String, TransactionError> {
    match (side, badge) {
        (Side::Supply, None) => Ok(builder.open_position(&OpenPositionArgs {
            component,
            account,
            assets,
        })),
        (Side::Supply, Some(badge)) => Ok(builder.position_supply(&PositionArgs {
            component,
            account,
            badge,
            assets,
        })),
        (Side::Borrow, None) => Err(TransactionError::NoPosition),
        (Side::Borrow, Some(badge)) => Ok(builder.position_borrow(&PositionArgs {
            component,
            account,
            badge,
            assets,
        })),
    }
}
