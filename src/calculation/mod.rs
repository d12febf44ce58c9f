//! Calculation logic for the bill rate estimator.
//!
//! This module contains the input validation, the per-step rounding rule,
//! the bill totals computation and the audited estimate built on top of it.

mod estimate;
mod rounding;
mod totals;
mod validation;

pub use estimate::estimate;
pub use rounding::{apply_percent, round_to_unit};
pub use totals::compute_totals;
pub use validation::{
    validate_components, validate_month_days, validate_staff_count, validate_terms,
};
