//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading estimator
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::validate_terms;
use crate::error::{EstimatorError, EstimatorResult};
use crate::models::{BillTerms, Unit};

use super::types::{EngineMetadata, EstimatorConfig, PresetsConfig, UnitsConfig};

/// Loads and provides access to estimator configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query term presets and site units.
///
/// # Directory Structure
///
/// ```text
/// config/axis/
/// ├── engine.yaml   # Name, version, currency, default preset
/// ├── presets.yaml  # Named percentage term sets
/// └── units.yaml    # Site unit catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use axis_billing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/axis")?;
/// let terms = loader.get_preset("standard")?;
/// println!("EPF: {}%", terms.epf_percent);
/// # Ok::<(), axis_billing::error::EstimatorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EstimatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - A preset contains a negative percentage (`InvalidInput`)
    /// - The default preset is not defined (`PresetNotFound`)
    pub fn load<P: AsRef<Path>>(path: P) -> EstimatorResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let presets = Self::load_yaml::<PresetsConfig>(&path.join("presets.yaml"))?;
        let units = Self::load_yaml::<UnitsConfig>(&path.join("units.yaml"))?;

        Self::from_parts(metadata, presets, units)
    }

    fn from_parts(
        metadata: EngineMetadata,
        presets: PresetsConfig,
        units: UnitsConfig,
    ) -> EstimatorResult<Self> {
        for (name, terms) in &presets.presets {
            validate_terms(terms).map_err(|err| match err {
                EstimatorError::InvalidInput { field, message } => EstimatorError::InvalidInput {
                    field: format!("presets.{}.{}", name, field),
                    message,
                },
                other => other,
            })?;
        }

        if !presets.presets.contains_key(&metadata.default_preset) {
            return Err(EstimatorError::PresetNotFound {
                name: metadata.default_preset.clone(),
            });
        }

        Ok(Self {
            config: EstimatorConfig::new(metadata, presets.presets, units.units),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EstimatorResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EstimatorError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EstimatorError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Gets a term preset by name.
    pub fn get_preset(&self, name: &str) -> EstimatorResult<&BillTerms> {
        self.config
            .presets()
            .get(name)
            .ok_or_else(|| EstimatorError::PresetNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the terms of the configured default preset.
    pub fn default_terms(&self) -> EstimatorResult<&BillTerms> {
        self.get_preset(&self.config.metadata().default_preset)
    }

    /// Returns every unit, sorted by code.
    pub fn units(&self) -> &[Unit] {
        self.config.units()
    }

    /// Returns the units a client may attach estimations to.
    ///
    /// Units without an owning client are shared and always included.
    pub fn units_for_client(&self, client_id: &str) -> Vec<&Unit> {
        self.units()
            .iter()
            .filter(|u| u.client_id.as_deref().is_none_or(|owner| owner == client_id))
            .collect()
    }

    /// Gets a unit by its code.
    pub fn get_unit(&self, code: &str) -> EstimatorResult<&Unit> {
        self.units()
            .iter()
            .find(|u| u.code == code)
            .ok_or_else(|| EstimatorError::UnitNotFound {
                code: code.to_string(),
            })
    }
}
