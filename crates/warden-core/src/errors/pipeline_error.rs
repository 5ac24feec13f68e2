//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, WardenErrorCode};
use super::{ConfigError, NormalizeError, RuleError, ScanError};

/// Errors that can occur during pipeline execution.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WardenErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Normalize(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
