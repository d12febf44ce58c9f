//! Input validation for the estimator.
//!
//! All validation runs before any arithmetic, so a rejected input never
//! yields partial totals.

use rust_decimal::Decimal;

use crate::error::{EstimatorError, EstimatorResult};
use crate::models::{BillTerms, SalaryComponents};

/// Ensures every salary component is non-negative.
pub fn validate_components(components: &SalaryComponents) -> EstimatorResult<()> {
    for (name, amount) in components.entries() {
        if amount < Decimal::ZERO {
            return Err(EstimatorError::invalid_input(
                format!("components.{}", name),
                format!("must not be negative, got {}", amount),
            ));
        }
    }
    Ok(())
}

/// Ensures every percentage term is non-negative.
pub fn validate_terms(terms: &BillTerms) -> EstimatorResult<()> {
    for (name, percent) in terms.entries() {
        if percent < Decimal::ZERO {
            return Err(EstimatorError::invalid_input(
                format!("terms.{}", name),
                format!("must not be negative, got {}", percent),
            ));
        }
    }
    Ok(())
}

/// Checks the staff count is a positive integer and narrows it to `u32`.
///
/// # Examples
///
/// ```
/// use axis_billing::calculation::validate_staff_count;
///
/// assert_eq!(validate_staff_count(2).unwrap(), 2);
/// assert!(validate_staff_count(0).is_err());
/// assert!(validate_staff_count(-3).is_err());
/// ```
pub fn validate_staff_count(staff_count: i64) -> EstimatorResult<u32> {
    if staff_count <= 0 {
        return Err(EstimatorError::invalid_input(
            "staff_count",
            format!("must be a positive integer, got {}", staff_count),
        ));
    }
    u32::try_from(staff_count).map_err(|_| {
        EstimatorError::invalid_input(
            "staff_count",
            format!("must not exceed {}, got {}", u32::MAX, staff_count),
        )
    })
}

/// Checks the month day count lies in 1..=31.
pub fn validate_month_days(month_days: u32) -> EstimatorResult<()> {
    if !(1..=31).contains(&month_days) {
        return Err(EstimatorError::invalid_input(
            "month_days",
            format!("must be between 1 and 31, got {}", month_days),
        ));
    }
    Ok(())
}
