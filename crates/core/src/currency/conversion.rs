//! Currency conversion logic.
//!
//! Rounding strategy for multi-currency:
//! - Always round to the target currency's decimal places
//! - Use banker's rounding (round half to even)
//! - Expenses keep both the original and the converted amount

use expapp_shared::types::{CurrencyCode, Money};
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    let converted = amount * rate;
    converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Converts `money` into `target` at `rate` (1 unit of `money.currency` = `rate` units of `target`).
#[must_use]
pub fn convert_money(money: Money, rate: Decimal, target: CurrencyCode) -> Money {
    Money::new(
        convert_amount(money.amount, rate, target.decimal_places()),
        target,
    )
}
