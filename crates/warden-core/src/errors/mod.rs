//! Error handling for Warden.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod normalize_error;
pub mod pipeline_error;
pub mod rule_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use error_code::WardenErrorCode;
pub use normalize_error::NormalizeError;
pub use pipeline_error::PipelineError;
pub use rule_error::RuleError;
pub use scan_error::ScanError;
