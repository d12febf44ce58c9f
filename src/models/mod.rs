//! Core data models for the bill rate estimator.
//!
//! This module contains all the domain models used throughout the crate.

mod bill_terms;
mod bill_totals;
mod estimation;
mod salary_components;

pub use bill_terms::BillTerms;
pub use bill_totals::{AuditStep, AuditTrace, BillEstimate, BillTotals};
pub use estimation::{EstimationRecord, NewEstimation, Unit};
pub use salary_components::SalaryComponents;
