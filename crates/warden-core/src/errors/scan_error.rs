//! Scan-level errors.

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while driving a scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Scan cancelled")]
    Cancelled,

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl WardenErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            Self::WorkerPool(_) => error_code::SCAN_ERROR,
        }
    }
}
