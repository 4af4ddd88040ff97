use lattic3_gateway::NonFungibleGlobalId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    reconciler::{ReconciledSide, ValuedAsset},
    snapshot::PortfolioSnapshot,
};

/// Collateral value over debt value.
///
/// `NoDebt` and `NoPosition` are kept apart: an account with an open position and
/// no debt is not the same thing as an account without a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HealthRatio {
    NoPosition,
    NoDebt,
    Ratio(Decimal),
}

impl HealthRatio {
    /// Numeric form of [`HealthRatio::NoDebt`].
    pub const NO_DEBT: Decimal = Decimal::NEGATIVE_ONE;

    /// Saturates at `Decimal::MAX` when dust debt pushes the ratio out of range.
    pub fn from_totals(total_supply_value: Decimal, total_debt_value: Decimal) -> Self {
        if total_debt_value > Decimal::ZERO {
            Self::Ratio(
                total_supply_value
                    .checked_div(total_debt_value)
                    .unwrap_or(Decimal::MAX),
            )
        } else {
            Self::NoDebt
        }
    }

    /// `-1` when there is no debt and `0` when there is no position.
    pub const fn value(self) -> Decimal {
        match self {
            Self::NoPosition => Decimal::ZERO,
            Self::NoDebt => Self::NO_DEBT,
            Self::Ratio(ratio) => ratio,
        }
    }
}

/// Value-weighted APY. Zero when the side holds no value.
pub fn weighted_apy(assets: &[ValuedAsset]) -> Decimal {
    let (total_value, weighted) =
        assets
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(total, weighted), asset| {
                let value = asset.value();
                (total + value, weighted + asset.apy * value)
            });

    if total_value > Decimal::ZERO {
        weighted / total_value
    } else {
        Decimal::ZERO
    }
}

/// Share of the supplied value taken by debt, in percent. Saturates like the health ratio.
pub fn borrow_power_used(total_supply_value: Decimal, total_debt_value: Decimal) -> Decimal {
    if total_supply_value > Decimal::ZERO {
        total_debt_value
            .checked_div(total_supply_value)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

/// Reduce both reconciled sides of an open position into a snapshot.
pub fn aggregate(
    badge: NonFungibleGlobalId,
    supplied: ReconciledSide,
    borrowed: ReconciledSide,
) -> PortfolioSnapshot {
    let total_supply_value = supplied.total_value;
    let total_debt_value = borrowed.total_value;

    let supply_apy = weighted_apy(&supplied.assets);
    let borrow_apy = weighted_apy(&borrowed.assets);

    PortfolioSnapshot {
        position_badge: Some(badge),
        supplied_assets: supplied.assets,
        borrowed_assets: borrowed.assets,
        total_supply_value,
        total_debt_value,
        health_ratio: HealthRatio::from_totals(total_supply_value, total_debt_value),
        net_worth: total_supply_value - total_debt_value,
        supply_apy,
        borrow_apy,
        net_apy: supply_apy - borrow_apy,
        borrow_power_used: borrow_power_used(total_supply_value, total_debt_value),
    }
}
