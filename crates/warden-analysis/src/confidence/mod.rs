//! Confidence scoring.
//!
//! The breakdown is the score: the final confidence is always the
//! weighted sum of the graded factors, never a number a matcher made up.

use serde::{Deserialize, Serialize};
use warden_core::config::ConfidenceWeights;
use warden_core::errors::ConfigError;

use crate::matchers::{AccessOperation, PatternMatchResult, TableSource};
use crate::normalize::chain::UnifiedCallChain;

/// Graded evidence, each factor in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    /// 1.0 literal table, 0.5 inferred, 0.0 absent.
    pub table_name: f64,
    /// 1.0 when at least one field was resolved.
    pub fields: f64,
    /// 1.0 when the method name mapped unambiguously to an operation.
    pub operation: f64,
    /// 1.0 when a specific client matcher claimed the chain; zero for
    /// the generic fallback.
    pub framework: f64,
    /// 1.0 when table/field arguments were literals; zero on a
    /// truncated chain, which may have lost them.
    pub literal: f64,
}

/// The factors plus a human-readable account of how they were graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub factors: ConfidenceFactors,
    pub explanation: String,
}

/// Weighted scorer; weights are validated once at construction.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    weights: ConfidenceWeights,
}

impl ConfidenceScorer {
    pub fn new(weights: ConfidenceWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ConfidenceWeights::default(),
        }
    }

    /// Grade the accepted match against its originating chain.
    pub fn score(
        &self,
        result: &PatternMatchResult,
        chain: &UnifiedCallChain,
    ) -> (f64, ConfidenceBreakdown) {
        let mut notes: Vec<String> = Vec::new();

        let table_name = match result.table_source {
            TableSource::Literal => 1.0,
            TableSource::Inferred => {
                notes.push("table inferred from model name".to_string());
                0.5
            }
            TableSource::Absent => {
                notes.push("table unresolved".to_string());
                0.0
            }
        };

        let fields = if result.fields.is_empty() {
            notes.push("no fields resolved".to_string());
            0.0
        } else {
            1.0
        };

        let operation = if result.operation_clear && result.operation != AccessOperation::Unknown {
            1.0
        } else {
            notes.push("operation ambiguous".to_string());
            0.0
        };

        let framework = if result.generic_fallback {
            notes.push("generic fallback matched".to_string());
            0.0
        } else {
            1.0
        };

        let literal = if chain.truncated {
            notes.push("chain truncated at depth limit".to_string());
            0.0
        } else if result.from_literal {
            1.0
        } else {
            0.0
        };

        let factors = ConfidenceFactors {
            table_name,
            fields,
            operation,
            framework,
            literal,
        };

        let confidence = (self.weights.table_name * table_name
            + self.weights.fields * fields
            + self.weights.operation * operation
            + self.weights.framework * framework
            + self.weights.literal * literal)
            .clamp(0.0, 1.0);

        let explanation = if notes.is_empty() {
            format!("{} matched with full evidence", result.orm)
        } else {
            format!("{} matched; {}", result.orm, notes.join("; "))
        };

        (confidence, ConfidenceBreakdown { factors, explanation })
    }

    pub fn weights(&self) -> &ConfidenceWeights {
        &self.weights
    }
}
