//! Configuration error types and validation traits.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A length or count that must be positive was zero or negative.
    #[error("{field} must be greater than 0, got {value}")]
    NonPositive { field: &'static str, value: String },

    /// A physical length was negative or not finite.
    #[error("{field} must be a finite non-negative length in centimeters, got {value}")]
    InvalidLength { field: &'static str, value: f64 },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error indicating that validation failed.
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },
}

/// A trait for validating configuration parameters.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Validates that an integer parameter is positive.
    fn validate_positive(&self, field: &'static str, value: u32) -> Result<(), ConfigError> {
        if value == 0 {
            Err(ConfigError::NonPositive {
                field,
                value: value.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that a physical length is finite and non-negative.
    fn validate_length(&self, field: &'static str, value: f64) -> Result<(), ConfigError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidLength { field, value })
        }
    }

    /// Validates that a physical length is finite and strictly positive.
    fn validate_positive_length(&self, field: &'static str, value: f64) -> Result<(), ConfigError> {
        self.validate_length(field, value)?;
        if value == 0.0 {
            return Err(ConfigError::NonPositive {
                field,
                value: value.to_string(),
            });
        }
        Ok(())
    }
}
