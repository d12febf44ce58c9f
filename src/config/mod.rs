//! Configuration loading and management for the bill rate estimator.
//!
//! This module loads term presets and the site unit catalogue from YAML
//! files, and reads the server's runtime settings from the environment.
//!
//! # Example
//!
//! ```no_run
//! use axis_billing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/axis").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::Settings;
pub use types::{EngineMetadata, EstimatorConfig, PresetsConfig, UnitsConfig};
