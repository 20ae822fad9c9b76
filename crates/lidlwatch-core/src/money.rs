//! Conversions between merchant currency amounts and integer minor units.
//!
//! Thresholds and prices are compared as integer cents. Amounts are converted
//! through [`Decimal`] so that values like `4.99` become `499` rather than the
//! `498` a binary float multiplication would truncate to.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

const MINOR_PER_MAJOR: i64 = 100;

/// Converts a currency amount to minor units by multiplying by 100 and
/// truncating toward zero.
///
/// Returns `None` when the result does not fit in an `i64`.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::from(MINOR_PER_MAJOR))?
        .trunc()
        .to_i64()
}

/// Converts a JSON-decoded price to minor units.
///
/// The float is first mapped to the shortest decimal that round-trips to it
/// (`3.99` stays `3.99`, not `3.9900000000000002131…`), then truncated as in
/// [`to_minor_units`]. Returns `None` for NaN, infinities and out-of-range
/// values.
#[must_use]
pub fn minor_units_from_f64(amount: f64) -> Option<i64> {
    Decimal::from_f64(amount).and_then(to_minor_units)
}

/// Formats minor units as a major-unit amount with two decimals, e.g. `450`
/// becomes `"4.50"`.
#[must_use]
pub fn format_minor_units(minor: i64) -> String {
    Decimal::new(minor, 2).to_string()
}
