//! Chain normalization errors. Recoverable per file.

use super::error_code::{self, WardenErrorCode};

/// Errors that can occur while normalizing a source file into call chains.
///
/// A node the normalizer cannot interpret yields no chain, not an error;
/// these variants cover file-level failures that exclude the file from
/// the current pass.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Syntax errors in {file}: {error_count} error node(s)")]
    SyntaxErrors { file: String, error_count: u32 },

    #[error("No grammar available for {file}")]
    UnsupportedLanguage { file: String },

    #[error("Parser failed on {file}: {message}")]
    ParserFailure { file: String, message: String },
}

impl WardenErrorCode for NormalizeError {
    fn error_code(&self) -> &'static str {
        error_code::NORMALIZE_ERROR
    }
}
