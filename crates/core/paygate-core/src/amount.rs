//! Major-to-minor currency unit conversion.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{GatewayError, GatewayResult};

/// Currency used when an order does not name one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Convert an amount in major units (dollars) to minor units (cents).
///
/// The amount is multiplied by 100 and rounded to the nearest integer, with
/// midpoints rounded away from zero. Arithmetic is exact decimal, so `19.99`
/// always becomes `1999`.
pub fn to_minor_units(amount: Decimal) -> GatewayResult<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| GatewayError::precondition(format!("amount {amount} is out of range")))
}

/// The given currency, or [`DEFAULT_CURRENCY`] when none is set
pub fn currency_or_default(currency: Option<&str>) -> &str {
    match currency {
        Some(code) if !code.is_empty() => code,
        _ => DEFAULT_CURRENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_whole_and_fractional_amounts() {
        assert_eq!(to_minor_units(Decimal::from(100)).unwrap(), 10_000);
        assert_eq!(to_minor_units(Decimal::from(25)).unwrap(), 2_500);
        assert_eq!(to_minor_units(Decimal::from_str("19.99").unwrap()).unwrap(), 1_999);
    }

    #[test]
    fn test_sub_cent_amounts_round_to_nearest() {
        assert_eq!(to_minor_units(Decimal::from_str("10.004").unwrap()).unwrap(), 1_000);
        assert_eq!(to_minor_units(Decimal::from_str("10.005").unwrap()).unwrap(), 1_001);
        assert_eq!(to_minor_units(Decimal::from_str("10.006").unwrap()).unwrap(), 1_001);
    }

    #[test]
    fn test_overflow_is_a_precondition_failure() {
        let err = to_minor_units(Decimal::MAX).unwrap_err();
        assert_eq!(err.code(), "PRECONDITION_FAILED");
    }

    #[test]
    fn test_currency_default() {
        assert_eq!(currency_or_default(None), "USD");
        assert_eq!(currency_or_default(Some("")), "USD");
        assert_eq!(currency_or_default(Some("EUR")), "EUR");
    }
}
