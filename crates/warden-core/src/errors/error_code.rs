//! Stable error codes, one per subsystem, surfaced to downstream consumers.

pub const CONFIG_ERROR: &str = "WARDEN_CONFIG";
pub const NORMALIZE_ERROR: &str = "WARDEN_NORMALIZE";
pub const RULE_ERROR: &str = "WARDEN_RULES";
pub const SCAN_ERROR: &str = "WARDEN_SCAN";
pub const CANCELLED: &str = "WARDEN_CANCELLED";

/// Trait implemented by every Warden error enum.
pub trait WardenErrorCode {
    fn error_code(&self) -> &'static str;
}
