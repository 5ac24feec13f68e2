//! Scan configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Configuration for the per-file analysis phase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum call-chain depth the normalizer will walk. Chains beyond
    /// this are emitted truncated, with reduced confidence downstream.
    /// Default: 32.
    pub max_chain_depth: Option<usize>,
    /// Worker threads for the per-file phase. Default: available cores.
    pub threads: Option<usize>,
}

impl ScanConfig {
    /// Returns the effective chain depth bound, defaulting to 32.
    pub fn effective_max_chain_depth(&self) -> usize {
        self.max_chain_depth.unwrap_or(32)
    }

    /// Returns the effective thread count, defaulting to available cores.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Validate bounds. Rejected at startup, not at scan time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chain_depth == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_chain_depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "threads".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_max_chain_depth(), 32);
        assert!(config.effective_threads() >= 1);
    }

    #[test]
    fn zero_depth_rejected() {
        let config = ScanConfig {
            max_chain_depth: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
