//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places money is rounded to.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to currency precision, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("2900.005").unwrap()), Decimal::from_str("2900.01").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("4833.3333").unwrap()), Decimal::from_str("4833.33").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
