//! Access-map types. Map keys are `BTreeMap`s so serialization order is
//! alphabetical and two scans of unchanged source serialize identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceBreakdown;
use crate::matchers::AccessOperation;
use crate::scanner::Language;
use crate::sensitive::SensitiveField;

/// One discovered data access, immutable once built; the next scan
/// supersedes it rather than mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAccessPoint {
    /// Stable id derived from (file, line, column, table, operation).
    pub id: String,
    pub table: String,
    pub fields: Vec<String>,
    pub operation: AccessOperation,
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// Snippet of the originating expression.
    pub context: String,
    pub is_raw_sql: bool,
    /// The canonical weighted score; always equals the breakdown's
    /// weighted sum.
    pub confidence: f64,
    pub confidence_breakdown: ConfidenceBreakdown,
    pub framework: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Per-table view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAccessInfo {
    pub table: String,
    /// Ids of the points touching this table, sorted.
    pub accessed_by: Vec<String>,
    /// Files touching this table, sorted and deduplicated.
    pub files: Vec<String>,
    pub reads: u32,
    pub writes: u32,
    pub deletes: u32,
}

/// Per-file view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAccessInfo {
    pub file: String,
    /// Ids of the points in this file, sorted.
    pub access_points: Vec<String>,
    /// Tables this file touches, sorted and deduplicated.
    pub tables: Vec<String>,
}

/// Scan counters, surfaced instead of hard failures for per-file and
/// per-chain degradation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub files_scanned: u32,
    pub files_failed: u32,
    pub tables_found: u32,
    pub access_points_found: u32,
    pub sensitive_fields_found: u32,
    pub violations_found: u32,
    pub scan_duration_ms: u64,
}

pub const ACCESS_MAP_VERSION: &str = "1.0";

/// The project-wide aggregate, fully rebuilt each scan.
///
/// Invariant: every id referenced by `tables[*].accessed_by` or
/// `files[*].access_points` exists in `access_points`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAccessMap {
    pub version: String,
    /// Distinct model/entity names seen, sorted.
    pub models: Vec<String>,
    pub tables: BTreeMap<String, TableAccessInfo>,
    pub files: BTreeMap<String, FileAccessInfo>,
    pub access_points: BTreeMap<String, DataAccessPoint>,
    /// Classified over every distinct (field, table) pair, independent
    /// of any rule.
    pub sensitive_fields: Vec<SensitiveField>,
    pub stats: ScanStats,
}

impl DataAccessMap {
    pub fn empty() -> Self {
        Self {
            version: ACCESS_MAP_VERSION.to_string(),
            models: Vec::new(),
            tables: BTreeMap::new(),
            files: BTreeMap::new(),
            access_points: BTreeMap::new(),
            sensitive_fields: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Sensitivity category for a field name, if the map flagged it.
    pub fn sensitivity_of(&self, field: &str) -> Option<&SensitiveField> {
        self.sensitive_fields.iter().find(|s| s.field == field)
    }
}
