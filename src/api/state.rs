//! Application state for the bill estimation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{EstimationRepository, EstimationService, InMemoryEstimationRepository};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and the estimation record service.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    estimations: EstimationService,
}

impl AppState {
    /// Creates a new application state backed by an in-memory repository.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_repository(config, Arc::new(InMemoryEstimationRepository::new()))
    }

    /// Creates a new application state over the given repository.
    pub fn with_repository(config: ConfigLoader, repository: Arc<dyn EstimationRepository>) -> Self {
        let config = Arc::new(config);
        Self {
            estimations: EstimationService::new(repository, Some(Arc::clone(&config))),
            config,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the estimation record service.
    pub fn estimations(&self) -> &EstimationService {
        &self.estimations
    }
}
