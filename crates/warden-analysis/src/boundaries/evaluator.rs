//! Rule evaluation: `DataAccessMap × BoundaryRules → BoundaryViolation[]`.
//!
//! Pure and single-threaded; its cost is linear in points × rules. A
//! point may violate several independent rules, but the same
//! (rule, point) pair is reported at most once.

use serde::{Deserialize, Serialize};

use crate::aggregate::{DataAccessMap, DataAccessPoint};
use crate::types::FxHashSet;

use super::rules::{BoundaryRule, BoundaryRules, Severity};

/// One rule breach. Built fresh each evaluation, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryViolation {
    pub rule_id: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub table: String,
    /// The fields that put the point in the rule's scope, or all of the
    /// point's fields for an unscoped rule.
    pub fields: Vec<String>,
    pub operation: crate::matchers::AccessOperation,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Evaluate every enabled rule against every access point.
pub fn evaluate(map: &DataAccessMap, rules: &BoundaryRules) -> Vec<BoundaryViolation> {
    let mut violations = Vec::new();
    let mut reported: FxHashSet<(String, String)> = FxHashSet::default();

    for point in map.access_points.values() {
        if rules
            .global_excludes
            .iter()
            .any(|pattern| pattern.matches(&point.file))
        {
            continue;
        }

        for rule in rules.rules.iter().filter(|r| r.enabled) {
            if !applies(rule, point) {
                continue;
            }
            if rule
                .allowed_paths
                .iter()
                .any(|pattern| pattern.matches(&point.file))
            {
                continue;
            }
            if rule
                .exclude_paths
                .iter()
                .any(|pattern| pattern.matches(&point.file))
            {
                continue;
            }
            if !reported.insert((rule.id.clone(), point.id.clone())) {
                continue;
            }
            violations.push(build_violation(rule, point, rules));
        }
    }

    violations.sort_by(|a, b| {
        (a.severity.rank(), &a.file, a.line, &a.rule_id)
            .cmp(&(b.severity.rank(), &b.file, b.line, &b.rule_id))
    });
    violations
}

/// Scope check: every non-empty dimension must admit the point.
fn applies(rule: &BoundaryRule, point: &DataAccessPoint) -> bool {
    if !rule.tables.is_empty() && !rule.tables.contains(&point.table) {
        return false;
    }
    if !rule.fields.is_empty() && !rule.fields.iter().any(|f| point.fields.contains(f)) {
        return false;
    }
    if !rule.operations.is_empty() && !rule.operations.contains(&point.operation) {
        return false;
    }
    true
}

fn build_violation(
    rule: &BoundaryRule,
    point: &DataAccessPoint,
    rules: &BoundaryRules,
) -> BoundaryViolation {
    let fields: Vec<String> = if rule.fields.is_empty() {
        point.fields.clone()
    } else {
        point
            .fields
            .iter()
            .filter(|f| rule.fields.contains(*f))
            .cloned()
            .collect()
    };

    // A critical-tier field raises the stakes regardless of what the
    // rule declared.
    let severity = if fields.iter().any(|f| rules.tiers.is_critical(f)) {
        Severity::Error
    } else {
        rule.severity
    };

    let message = rule.message.clone().unwrap_or_else(|| {
        format!(
            "{} access to table '{}' from {} is outside the allowed paths for rule {}",
            point.operation, point.table, point.file, rule.id
        )
    });

    BoundaryViolation {
        rule_id: rule.id.clone(),
        file: point.file.clone(),
        line: point.line,
        column: point.column,
        table: point.table.clone(),
        fields,
        operation: point.operation,
        severity,
        message,
        suggestion: rule.suggestion.clone(),
    }
}
