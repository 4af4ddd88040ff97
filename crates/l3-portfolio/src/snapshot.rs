use lattic3_gateway::NonFungibleGlobalId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{reconciler::ValuedAsset, risk::HealthRatio};

/// Risk and yield summary of an account, rebuilt from scratch on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSnapshot {
    /// `None` when the account has no position badge.
    pub position_badge: Option<NonFungibleGlobalId>,
    pub supplied_assets: Vec<ValuedAsset>,
    pub borrowed_assets: Vec<ValuedAsset>,
    pub total_supply_value: Decimal,
    pub total_debt_value: Decimal,
    pub health_ratio: HealthRatio,
    pub net_worth: Decimal,
    pub supply_apy: Decimal,
    pub borrow_apy: Decimal,
    pub net_apy: Decimal,
    /// Percent.
    pub borrow_power_used: Decimal,
}

impl PortfolioSnapshot {
    /// Snapshot of an account without a position.
    pub const fn empty() -> Self {
        Self {
            position_badge: None,
            supplied_assets: Vec::new(),
            borrowed_assets: Vec::new(),
            total_supply_value: Decimal::ZERO,
            total_debt_value: Decimal::ZERO,
            health_ratio: HealthRatio::NoPosition,
            net_worth: Decimal::ZERO,
            supply_apy: Decimal::ZERO,
            borrow_apy: Decimal::ZERO,
            net_apy: Decimal::ZERO,
            borrow_power_used: Decimal::ZERO,
        }
    }

    pub const fn has_position(&self) -> bool {
        self.position_badge.is_some()
    }
}

impl Default for PortfolioSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = PortfolioSnapshot::empty();
        assert!(!snapshot.has_position());
        assert!(snapshot.supplied_assets.is_empty());
        assert!(snapshot.borrowed_assets.is_empty());
        assert_eq!(snapshot.health_ratio.value(), Decimal::ZERO);
        assert_eq!(
            snapshot.net_worth,
            snapshot.total_supply_value - snapshot.total_debt_value
        );
    }
}
