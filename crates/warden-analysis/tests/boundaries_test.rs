//! Rule loading (all-or-nothing) and evaluation semantics.

use warden_analysis::aggregate::{build_access_map, DataAccessPoint};
use warden_analysis::boundaries::{evaluate, load_rules, Severity};
use warden_analysis::confidence::{ConfidenceBreakdown, ConfidenceFactors};
use warden_analysis::matchers::AccessOperation;
use warden_analysis::scanner::Language;
use warden_analysis::sensitive::LexiconClassifier;
use warden_core::errors::RuleError;

fn point(file: &str, line: u32, table: &str, operation: AccessOperation, fields: &[&str]) -> DataAccessPoint {
    DataAccessPoint {
        id: String::new(),
        table: table.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
        operation,
        file: file.to_string(),
        line,
        column: 1,
        context: format!("{table} access"),
        is_raw_sql: false,
        confidence: 0.8,
        confidence_breakdown: ConfidenceBreakdown {
            factors: ConfidenceFactors {
                table_name: 1.0,
                fields: 1.0,
                operation: 1.0,
                framework: 1.0,
                literal: 0.0,
            },
            explanation: "test".to_string(),
        },
        framework: "supabase".to_string(),
        language: Language::TypeScript,
        model: None,
    }
}

fn map_of(points: Vec<DataAccessPoint>) -> warden_analysis::aggregate::DataAccessMap {
    build_access_map(points, &LexiconClassifier::new())
}

#[test]
fn only_files_outside_allowed_paths_violate() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [{
                "id": "billing-only",
                "tables": ["payments"],
                "allowedPaths": ["services/billing/**"],
                "severity": "error"
            }]
        }"#,
    )
    .unwrap();
    let map = map_of(vec![
        point("services/billing/charge.ts", 3, "payments", AccessOperation::Read, &[]),
        point("services/reports/summary.ts", 8, "payments", AccessOperation::Read, &[]),
    ]);

    let violations = evaluate(&map, &rules);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].file, "services/reports/summary.ts");
    assert_eq!(violations[0].rule_id, "billing-only");
    assert_eq!(violations[0].severity, Severity::Error);
}

#[test]
fn missing_severity_rejects_whole_document() {
    let err = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [
                {
                    "id": "ok",
                    "allowedPaths": ["src/**"],
                    "severity": "warning"
                },
                {
                    "id": "broken",
                    "allowedPaths": ["src/**"]
                }
            ]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RuleError::MissingField { ref rule_id, ref field } if rule_id == "broken" && field == "severity"
    ));
}

#[test]
fn missing_allowed_paths_rejects_document() {
    let err = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [{ "id": "r", "severity": "error" }]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, RuleError::MissingField { ref field, .. } if field == "allowedPaths"));
}

#[test]
fn unknown_operation_rejects_document() {
    let err = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [{
                "id": "r",
                "operations": ["truncate"],
                "allowedPaths": ["src/**"],
                "severity": "error"
            }]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, RuleError::UnknownOperation { ref operation, .. } if operation == "truncate"));
}

#[test]
fn bad_version_and_duplicate_ids_reject() {
    let err = load_rules(r#"{ "version": "2.0", "boundaries": [] }"#).unwrap_err();
    assert!(matches!(err, RuleError::UnsupportedVersion(_)));

    let err = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [
                { "id": "dup", "allowedPaths": ["a/**"], "severity": "info" },
                { "id": "dup", "allowedPaths": ["b/**"], "severity": "info" }
            ]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, RuleError::DuplicateRuleId(ref id) if id == "dup"));
}

#[test]
fn overlapping_tiers_reject() {
    let err = load_rules(
        r#"{
            "version": "1.0",
            "sensitivity": {
                "critical": ["ssn"],
                "sensitive": ["ssn"]
            },
            "boundaries": []
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, RuleError::OverlappingTiers { ref field } if field == "ssn"));
}

#[test]
fn rules_without_ids_get_positional_ones() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [
                { "allowedPaths": ["a/**"], "severity": "info" },
                { "allowedPaths": ["b/**"], "severity": "info" }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(rules.rules[0].id, "rule-1");
    assert_eq!(rules.rules[1].id, "rule-2");
}

#[test]
fn scope_dimensions_all_must_admit_the_point() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [{
                "id": "writes-only",
                "tables": ["users"],
                "operations": ["write", "delete"],
                "allowedPaths": ["services/accounts/**"],
                "severity": "warning"
            }]
        }"#,
    )
    .unwrap();
    let map = map_of(vec![
        point("web/admin.ts", 1, "users", AccessOperation::Read, &[]),
        point("web/admin.ts", 2, "users", AccessOperation::Write, &[]),
        point("web/admin.ts", 3, "orders", AccessOperation::Write, &[]),
    ]);

    let violations = evaluate(&map, &rules);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, 2);
    assert_eq!(violations[0].operation, AccessOperation::Write);
}

#[test]
fn global_excludes_suppress_matching_files() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [{
                "id": "r",
                "tables": ["users"],
                "allowedPaths": ["services/accounts/**"],
                "severity": "error"
            }],
            "globalExcludes": ["**/fixtures/**"]
        }"#,
    )
    .unwrap();
    let map = map_of(vec![
        point("tests/fixtures/seed.ts", 1, "users", AccessOperation::Write, &[]),
        point("web/admin.ts", 2, "users", AccessOperation::Write, &[]),
    ]);

    let violations = evaluate(&map, &rules);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].file, "web/admin.ts");
}

#[test]
fn disabled_rules_do_not_fire() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [{
                "id": "off",
                "tables": ["users"],
                "allowedPaths": ["never/**"],
                "severity": "error",
                "enabled": false
            }]
        }"#,
    )
    .unwrap();
    let map = map_of(vec![point("web/a.ts", 1, "users", AccessOperation::Read, &[])]);
    assert!(evaluate(&map, &rules).is_empty());
}

#[test]
fn one_point_can_violate_multiple_rules() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [
                {
                    "id": "table-scope",
                    "tables": ["users"],
                    "allowedPaths": ["services/accounts/**"],
                    "severity": "warning"
                },
                {
                    "id": "field-scope",
                    "fields": ["ssn"],
                    "allowedPaths": ["services/compliance/**"],
                    "severity": "error"
                }
            ]
        }"#,
    )
    .unwrap();
    let map = map_of(vec![point(
        "web/admin.ts",
        4,
        "users",
        AccessOperation::Read,
        &["ssn"],
    )]);

    let violations = evaluate(&map, &rules);
    assert_eq!(violations.len(), 2);
    // error sorts before warning
    assert_eq!(violations[0].rule_id, "field-scope");
    assert_eq!(violations[1].rule_id, "table-scope");
}

#[test]
fn critical_tier_field_escalates_severity() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "sensitivity": { "critical": ["ssn"] },
            "boundaries": [{
                "id": "r",
                "tables": ["users"],
                "allowedPaths": ["services/accounts/**"],
                "severity": "info"
            }]
        }"#,
    )
    .unwrap();
    let map = map_of(vec![
        point("web/a.ts", 1, "users", AccessOperation::Read, &["ssn"]),
        point("web/b.ts", 2, "users", AccessOperation::Read, &["name"]),
    ]);

    let violations = evaluate(&map, &rules);
    assert_eq!(violations.len(), 2);
    let escalated = violations.iter().find(|v| v.file == "web/a.ts").unwrap();
    assert_eq!(escalated.severity, Severity::Error);
    let untouched = violations.iter().find(|v| v.file == "web/b.ts").unwrap();
    assert_eq!(untouched.severity, Severity::Info);
}

#[test]
fn violations_sort_by_severity_then_file_then_line() {
    let rules = load_rules(
        r#"{
            "version": "1.0",
            "boundaries": [
                {
                    "id": "warns",
                    "tables": ["users"],
                    "allowedPaths": ["none/**"],
                    "severity": "warning"
                },
                {
                    "id": "errors",
                    "tables": ["payments"],
                    "allowedPaths": ["none/**"],
                    "severity": "error"
                }
            ]
        }"#,
    )
    .unwrap();
    let map = map_of(vec![
        point("z.ts", 9, "users", AccessOperation::Read, &[]),
        point("a.ts", 5, "users", AccessOperation::Read, &[]),
        point("m.ts", 1, "payments", AccessOperation::Read, &[]),
    ]);

    let violations = evaluate(&map, &rules);
    let order: Vec<(&str, &str)> = violations
        .iter()
        .map(|v| (v.rule_id.as_str(), v.file.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![("errors", "m.ts"), ("warns", "a.ts"), ("warns", "z.ts")]
    );
}
