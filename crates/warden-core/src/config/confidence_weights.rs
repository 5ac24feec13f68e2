//! Confidence weights for access-point scoring.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Weights for the five confidence factors. Must sum to 1.0.
///
/// Invalid weights are rejected when the scorer is constructed, never at
/// evaluation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub table_name: f64,
    pub fields: f64,
    pub operation: f64,
    pub framework: f64,
    pub literal: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            table_name: 0.3,
            fields: 0.2,
            operation: 0.2,
            framework: 0.2,
            literal: 0.1,
        }
    }
}

impl ConfidenceWeights {
    /// Validate that the weights are non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("table_name", self.table_name),
            ("fields", self.fields),
            ("operation", self.operation),
            ("framework", self.framework),
            ("literal", self.literal),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("weight {value} out of [0,1]"),
                });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::InvalidWeights { sum });
        }
        Ok(())
    }

    /// Sum of all five weights.
    pub fn sum(&self) -> f64 {
        self.table_name + self.fields + self.operation + self.framework + self.literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = ConfidenceWeights::default();
        assert!(weights.validate().is_ok());
        assert!((weights.sum() - 1.0).abs() < WEIGHT_SUM_EPSILON);
    }

    #[test]
    fn unbalanced_weights_rejected() {
        let weights = ConfidenceWeights {
            table_name: 0.5,
            ..Default::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeights { .. }));
    }

    #[test]
    fn negative_weight_rejected() {
        let weights = ConfidenceWeights {
            table_name: -0.1,
            fields: 0.4,
            operation: 0.2,
            framework: 0.4,
            literal: 0.1,
        };
        assert!(weights.validate().is_err());
    }
}
