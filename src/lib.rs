//! Bill rate estimation engine for AXIS client billing.
//!
//! This crate derives the per-head and total monthly bill for a staffing
//! service from a salary breakdown and a set of percentage terms, and keeps
//! saved estimations whose totals always match their inputs.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
