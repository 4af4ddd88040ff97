use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::AmountError;

/// Parse and check a user-entered amount against the row maximum.
///
/// An empty input reads as zero.
pub fn validate_amount(input: &str, max: Decimal) -> Result<Decimal, AmountError> {
    let amount = parse_amount(input)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative);
    }
    if amount > max {
        return Err(AmountError::ExceedsMax { max });
    }
    Ok(amount)
}

/// Amount kept for a row while its input is invalid: the parsed value when it is
/// a non-negative number, zero otherwise.
pub fn fallback_amount(input: &str) -> Decimal {
    match parse_amount(input) {
        Ok(amount) if !amount.is_sign_negative() => amount,
        _ => Decimal::ZERO,
    }
}

fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountError::InvalidNumber)
}
