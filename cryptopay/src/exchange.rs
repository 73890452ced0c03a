//! Exchange-rate lookup and fiat-to-asset conversion.

use rust_decimal::Decimal;

use crate::model::ExchangeRate;

/// Finds the first usable rate that converts `source` into `target`.
///
/// Rates flagged invalid or with a non-positive value are skipped.
#[must_use]
pub fn find_rate<'a>(rates: &'a [ExchangeRate], source: &str, target: &str) -> Option<&'a ExchangeRate> {
    rates
        .iter()
        .find(|rate| rate.is_usable() && rate.matches(source, target))
}

/// Converts a fiat `amount` into units of the rate's source asset.
///
/// Returns `None` if the rate is zero or the division overflows.
#[must_use]
pub fn convert(amount: Decimal, rate: &ExchangeRate) -> Option<Decimal> {
    amount.checked_div(rate.rate)
}
