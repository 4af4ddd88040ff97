use std::str::FromStr;

use lattic3_gateway::{GatewayClient, NonFungibleData, NonFungibleGlobalId};
use lattic3_types::Side;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::PortfolioError;

/// One `resource address -> amount` entry of the position badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawPositionEntry {
    pub resource_address: String,
    pub amount: Decimal,
}

/// Supply and borrow entries of a position badge, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedPosition {
    pub supply: Vec<RawPositionEntry>,
    pub borrow: Vec<RawPositionEntry>,
}

impl DecodedPosition {
    pub fn entries(&self, side: Side) -> &[RawPositionEntry] {
        match side {
            Side::Supply => &self.supply,
            Side::Borrow => &self.borrow,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.supply.is_empty() && self.borrow.is_empty()
    }
}

/// Result of looking up the position badge of an account.
///
/// `NoPosition` means the account never opened a position, which is not the same
/// thing as an `Open` position whose entries are all gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionLookup {
    NoPosition,
    Open {
        badge: NonFungibleGlobalId,
        position: DecodedPosition,
    },
}

/// Decode the `supply` and `borrow` maps of a position badge. A missing field
/// decodes to no entries.
pub fn decode_position(data: &NonFungibleData) -> Result<DecodedPosition, PortfolioError> {
    Ok(DecodedPosition {
        supply: decode_side(data, Side::Supply)?,
        borrow: decode_side(data, Side::Borrow)?,
    })
}

fn decode_side(data: &NonFungibleData, side: Side) -> Result<Vec<RawPositionEntry>, PortfolioError> {
    let Some(field) = data.programmatic_json.field(side.field_name()) else {
        return Ok(Vec::new());
    };

    field
        .entries
        .iter()
        .map(|entry| {
            let amount = Decimal::from_str(entry.value.value.trim()).map_err(|_| {
                PortfolioError::InvalidAmount {
                    side,
                    resource_address: entry.key.value.clone(),
                    value: entry.value.value.clone(),
                }
            })?;

            Ok(RawPositionEntry {
                resource_address: entry.key.value.clone(),
                amount,
            })
        })
        .collect()
}

/// Find the position badge held by `account` and decode its data.
pub async fn lookup_position(
    gateway: &dyn GatewayClient,
    account: &str,
    badge_address: &str,
) -> Result<PositionLookup, PortfolioError> {
    let details = gateway.get_entity_details_vault_aggregated(account).await?;

    let Some(badge) = details.first_non_fungible(badge_address) else {
        return Ok(PositionLookup::NoPosition);
    };

    let data = gateway
        .get_non_fungible_data(&badge.resource_address, &badge.local_id)
        .await?;
    let position = decode_position(&data)?;

    Ok(PositionLookup::Open { badge, position })
}
