//! Rounding and percentage helpers.
//!
//! Every derived amount on a bill is rounded to a whole currency unit at the
//! point it is derived. Rounding is never deferred to the end.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EstimatorError, EstimatorResult};

/// Rounds a value to the nearest whole currency unit, half away from zero.
///
/// # Examples
///
/// ```
/// use axis_billing::calculation::round_to_unit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_unit(Decimal::from_str("487.5").unwrap()), Decimal::from(488));
/// assert_eq!(round_to_unit(Decimal::from_str("1886.2").unwrap()), Decimal::from(1886));
/// assert_eq!(round_to_unit(Decimal::from_str("832.49").unwrap()), Decimal::from(832));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies `percent` to `basis` and rounds the result to a whole unit.
///
/// Computes `round(basis * percent / 100)`. The `field` names the term the
/// percentage came from and is reported if the multiplication overflows.
///
/// # Examples
///
/// ```
/// use axis_billing::calculation::apply_percent;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let esi = apply_percent(
///     Decimal::from(15000),
///     Decimal::from_str("3.25").unwrap(),
///     "terms.esi_percent",
/// )?;
/// assert_eq!(esi, Decimal::from(488));
/// # Ok::<(), axis_billing::error::EstimatorError>(())
/// ```
pub fn apply_percent(basis: Decimal, percent: Decimal, field: &str) -> EstimatorResult<Decimal> {
    let scaled = basis
        .checked_mul(percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| {
            EstimatorError::invalid_input(
                field,
                format!("{}% of {} exceeds the representable range", percent, basis),
            )
        })?;
    Ok(round_to_unit(scaled))
}
