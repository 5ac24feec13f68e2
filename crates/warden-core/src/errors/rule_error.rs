//! Boundary rule errors. Fatal at load: a partially-loaded policy is a
//! silent security gap, so any invalid rule rejects the whole document.

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while loading a boundary rules document.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Rules document is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Unsupported rules version: {0}")]
    UnsupportedVersion(String),

    #[error("Rule {rule_id}: missing required field {field}")]
    MissingField { rule_id: String, field: String },

    #[error("Rule {rule_id}: unknown operation {operation}")]
    UnknownOperation { rule_id: String, operation: String },

    #[error("Rule {rule_id}: invalid glob pattern {pattern}: {message}")]
    InvalidGlob {
        rule_id: String,
        pattern: String,
        message: String,
    },

    #[error("Invalid global exclude pattern {pattern}: {message}")]
    InvalidGlobalExclude { pattern: String, message: String },

    #[error("Rule {rule_id}: invalid severity {value}")]
    InvalidSeverity { rule_id: String, value: String },

    #[error("Field {field} appears in more than one sensitivity tier")]
    OverlappingTiers { field: String },

    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),
}

impl WardenErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
