//! Core types, errors, config, and cancellation for Warden.
//!
//! Warden discovers database/data-store access across a polyglot codebase
//! and polices it against declarative boundary rules. This crate holds the
//! pieces every subsystem needs; the analysis engine lives in
//! `warden-analysis`.

pub mod cancellation;
pub mod config;
pub mod errors;
pub mod types;

pub use cancellation::ScanCancellation;
pub use config::{ConfidenceWeights, ScanConfig};
pub use errors::{ConfigError, NormalizeError, PipelineError, RuleError, ScanError};
