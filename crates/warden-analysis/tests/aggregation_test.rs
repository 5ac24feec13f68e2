//! Access-map aggregation: stable ids, canonical ordering, the unknown
//! bucket, and sensitivity classification.

use warden_analysis::aggregate::{build_access_map, DataAccessPoint};
use warden_analysis::confidence::{ConfidenceBreakdown, ConfidenceFactors};
use warden_analysis::matchers::AccessOperation;
use warden_analysis::scanner::Language;
use warden_analysis::sensitive::{LexiconClassifier, SensitivityType};

fn point(
    file: &str,
    line: u32,
    table: &str,
    operation: AccessOperation,
    fields: &[&str],
) -> DataAccessPoint {
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

#[test]
fn ids_do_not_depend_on_input_order() {
    let classifier = LexiconClassifier::new();
    let a = point("src/a.ts", 1, "users", AccessOperation::Read, &["id"]);
    let b = point("src/b.ts", 5, "orders", AccessOperation::Write, &["total"]);
    let c = point("src/a.ts", 9, "users", AccessOperation::Delete, &[]);

    let forward = build_access_map(vec![a.clone(), b.clone(), c.clone()], &classifier);
    let reversed = build_access_map(vec![c, b, a], &classifier);

    assert_eq!(
        serde_json::to_string(&forward).unwrap(),
        serde_json::to_string(&reversed).unwrap()
    );
}

#[test]
fn referenced_ids_always_exist() {
    let classifier = LexiconClassifier::new();
    let map = build_access_map(
        vec![
            point("src/a.ts", 1, "users", AccessOperation::Read, &["id"]),
            point("src/a.ts", 2, "users", AccessOperation::Write, &[]),
            point("src/b.ts", 3, "orders", AccessOperation::Read, &[]),
        ],
        &classifier,
    );

    for table in map.tables.values() {
        for id in &table.accessed_by {
            assert!(map.access_points.contains_key(id));
        }
    }
    for file in map.files.values() {
        for id in &file.access_points {
            assert!(map.access_points.contains_key(id));
        }
    }
}

#[test]
fn per_table_operation_counts() {
    let classifier = LexiconClassifier::new();
    let map = build_access_map(
        vec![
            point("src/a.ts", 1, "users", AccessOperation::Read, &[]),
            point("src/b.ts", 2, "users", AccessOperation::Read, &[]),
            point("src/b.ts", 3, "users", AccessOperation::Delete, &[]),
        ],
        &classifier,
    );
    let users = &map.tables["users"];
    assert_eq!(users.reads, 2);
    assert_eq!(users.writes, 0);
    assert_eq!(users.deletes, 1);
    assert_eq!(users.files, vec!["src/a.ts", "src/b.ts"]);
}

#[test]
fn unknown_table_is_its_own_bucket() {
    let classifier = LexiconClassifier::new();
    let map = build_access_map(
        vec![
            point("src/a.ts", 1, "users", AccessOperation::Read, &[]),
            point("src/a.ts", 2, "unknown", AccessOperation::Read, &[]),
        ],
        &classifier,
    );
    assert_eq!(map.tables.len(), 2);
    assert!(map.tables.contains_key("unknown"));
    assert_eq!(map.tables["unknown"].reads, 1);
}

#[test]
fn duplicate_identity_tuples_get_distinct_ids() {
    let classifier = LexiconClassifier::new();
    let map = build_access_map(
        vec![
            point("src/a.ts", 1, "users", AccessOperation::Read, &[]),
            point("src/a.ts", 1, "users", AccessOperation::Read, &[]),
        ],
        &classifier,
    );
    assert_eq!(map.access_points.len(), 2);
}

#[test]
fn sensitive_fields_classified_independent_of_rules() {
    let classifier = LexiconClassifier::new();
    let map = build_access_map(
        vec![point(
            "src/a.ts",
            1,
            "users",
            AccessOperation::Read,
            &["id", "ssn", "password"],
        )],
        &classifier,
    );
    let ssn = map.sensitivity_of("ssn").expect("ssn flagged");
    assert_eq!(ssn.sensitivity, SensitivityType::Pii);
    assert_eq!(ssn.table.as_deref(), Some("users"));
    let password = map.sensitivity_of("password").expect("password flagged");
    assert_eq!(password.sensitivity, SensitivityType::Credentials);
    assert!(map.sensitivity_of("id").is_none());
}

#[test]
fn serialization_round_trips_counts() {
    let classifier = LexiconClassifier::new();
    let map = build_access_map(
        vec![
            point("src/a.ts", 1, "users", AccessOperation::Read, &["ssn"]),
            point("src/b.ts", 2, "orders", AccessOperation::Write, &[]),
        ],
        &classifier,
    );
    let json = serde_json::to_string(&map).unwrap();
    let parsed: warden_analysis::aggregate::DataAccessMap = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.access_points.len(), map.access_points.len());
    assert_eq!(parsed.tables.len(), map.tables.len());
    assert_eq!(parsed.files.len(), map.files.len());
    assert_eq!(
        parsed.tables["users"].accessed_by,
        map.tables["users"].accessed_by
    );
}
