//! Text rendering of snapshot figures.

use lattic3_portfolio::HealthRatio;
use rust_decimal::{Decimal, RoundingStrategy};

fn two_places(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Dollar amount with two decimals, sign in front of the symbol.
pub fn format_usd(value: Decimal) -> String {
    let rounded = two_places(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

pub fn format_pct(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}

pub fn format_health(health: HealthRatio) -> String {
    match health {
        HealthRatio::NoPosition => "—".to_string(),
        HealthRatio::NoDebt => "∞".to_string(),
        HealthRatio::Ratio(ratio) => format!("{:.2}", two_places(ratio)),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(100)), "$100.00");
        assert_eq!(format_usd(dec!(12.345)), "$12.35");
        assert_eq!(format_usd(dec!(-5)), "-$5.00");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(dec!(5)), "5.0%");
        assert_eq!(format_pct(dec!(-4.25)), "-4.3%");
        assert_eq!(format_pct(dec!(66.666)), "66.7%");
    }

    #[test]
    fn test_format_health() {
        assert_eq!(format_health(HealthRatio::NoPosition), "—");
        assert_eq!(format_health(HealthRatio::NoDebt), "∞");
        assert_eq!(format_health(HealthRatio::Ratio(dec!(1.5))), "1.50");
        assert_eq!(format_health(HealthRatio::Ratio(dec!(2) / dec!(3))), "0.67");
    }
}
