//! Matcher output types.

use serde::{Deserialize, Serialize};

/// What a data access does to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessOperation {
    Read,
    Write,
    Delete,
    Unknown,
}

impl AccessOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessOperation::Read => "read",
            AccessOperation::Write => "write",
            AccessOperation::Delete => "delete",
            AccessOperation::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AccessOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the table name was obtained, which grades the strongest
/// confidence factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSource {
    /// Read directly from a string literal in the chain.
    Literal,
    /// Derived from a model or entity name by convention.
    Inferred,
    /// Could not be determined; the access lands in the `unknown` bucket.
    Absent,
}

/// A successful classification of one chain by one matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternMatchResult {
    /// Framework identifier, e.g. `"supabase"` or `"raw-sql"`.
    pub orm: String,
    /// Table name, or the `"unknown"` sentinel.
    pub table: String,
    pub table_source: TableSource,
    /// Field names touched, when the chain exposes them.
    pub fields: Vec<String>,
    pub operation: AccessOperation,
    /// True when the operation was read off an explicit method or SQL
    /// verb rather than guessed.
    pub operation_clear: bool,
    /// The matcher's own prior in `[0, 1]`, an input to the framework
    /// factor of the canonical score.
    pub confidence: f32,
    pub is_raw_sql: bool,
    /// True when the table name came from a string literal.
    pub from_literal: bool,
    /// True for last-resort matchers like the raw-SQL fallback; zeroes
    /// the framework factor downstream.
    pub generic_fallback: bool,
    /// Model/entity name for ORMs that expose one.
    pub model: Option<String>,
    /// Matcher-specific extras, carried through but never interpreted by
    /// the scorer or the aggregator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl PatternMatchResult {
    /// Sentinel table for accesses whose target could not be resolved.
    pub const UNKNOWN_TABLE: &'static str = "unknown";
}
