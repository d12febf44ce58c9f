//! HTTP API module for the AXIS bill estimator.
//!
//! This module provides the REST endpoints for estimating client bill
//! rates, looking up presets and units, and managing saved estimations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClientFilter, EstimateRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
