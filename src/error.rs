//! Error types for the bill rate estimator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while estimating bills, loading
//! configuration, or managing estimation records.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the bill rate estimator.
///
/// All operations in the crate return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use axis_billing::error::EstimatorError;
///
/// let error = EstimatorError::InvalidInput {
///     field: "staff_count".to_string(),
///     message: "must be a positive integer, got 0".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input 'staff_count': must be a positive integer, got 0"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// An input value failed validation.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid (e.g. `components.basic`).
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A named term preset was not found in the configuration.
    #[error("Term preset not found: {name}")]
    PresetNotFound {
        /// The preset name that was not found.
        name: String,
    },

    /// A unit code was not found in the unit catalogue.
    #[error("Unit not found: {code}")]
    UnitNotFound {
        /// The unit code that was not found.
        code: String,
    },

    /// No estimation record exists with the given identifier.
    #[error("Estimation not found: {id}")]
    EstimationNotFound {
        /// The identifier that was looked up.
        id: Uuid,
    },
}

impl EstimatorError {
    /// Convenience constructor for [`EstimatorError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EstimatorError.
pub type EstimatorResult<T> = Result<T, EstimatorError>;
