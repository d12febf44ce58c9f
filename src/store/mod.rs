//! Estimation record storage.
//!
//! This module holds the repository seam for estimation records and the
//! service that keeps stored totals consistent with their inputs.

mod repository;
mod service;

pub use repository::{EstimationRepository, InMemoryEstimationRepository};
pub use service::EstimationService;
