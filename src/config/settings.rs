//! Runtime settings for the estimation server.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EstimatorError, EstimatorResult};

const DEFAULT_CONFIG_DIR: &str = "./config/axis";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Server settings read from the environment.
///
/// | Variable          | Default           |
/// |-------------------|-------------------|
/// | `AXIS_CONFIG_DIR` | `./config/axis`   |
/// | `AXIS_BIND_ADDR`  | `127.0.0.1:3000`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding `engine.yaml`, `presets.yaml` and `units.yaml`.
    pub config_dir: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Settings {
    /// Reads settings from the process environment, loading `.env` first
    /// when present.
    pub fn from_env() -> EstimatorResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> EstimatorResult<Self> {
        let config_dir = lookup("AXIS_CONFIG_DIR").unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());
        let bind_addr = lookup("AXIS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let bind_addr = bind_addr.parse().map_err(|_| {
            EstimatorError::invalid_input(
                "AXIS_BIND_ADDR",
                format!("'{}' is not a socket address", bind_addr),
            )
        })?;

        Ok(Self {
            config_dir: PathBuf::from(config_dir),
            bind_addr,
        })
    }
}
