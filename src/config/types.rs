//! Configuration types for bill estimation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{BillTerms, Unit};

/// Metadata about the estimator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the configuration set.
    pub name: String,
    /// Version or effective date of the configuration.
    pub version: String,
    /// ISO currency code all amounts are expressed in.
    pub currency: String,
    /// The preset applied when a request names none.
    pub default_preset: String,
}

/// Presets configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetsConfig {
    /// Map of preset name to its terms.
    pub presets: HashMap<String, BillTerms>,
}

/// Units configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitsConfig {
    /// The unit catalogue.
    pub units: Vec<Unit>,
}

/// The complete estimator configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    metadata: EngineMetadata,
    presets: HashMap<String, BillTerms>,
    /// Units sorted by code.
    units: Vec<Unit>,
}

impl EstimatorConfig {
    /// Creates a new EstimatorConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        presets: HashMap<String, BillTerms>,
        units: Vec<Unit>,
    ) -> Self {
        let mut sorted_units = units;
        sorted_units.sort_by(|a, b| a.code.cmp(&b.code));
        Self {
            metadata,
            presets,
            units: sorted_units,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all term presets.
    pub fn presets(&self) -> &HashMap<String, BillTerms> {
        &self.presets
    }

    /// Returns the unit catalogue.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}
