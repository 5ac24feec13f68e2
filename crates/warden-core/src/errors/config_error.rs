//! Configuration errors. Rejected at startup, never at evaluation time.

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while constructing or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Confidence weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl WardenErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
