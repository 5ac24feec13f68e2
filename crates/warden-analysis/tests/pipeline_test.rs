//! End-to-end scans: source text in, access map and violations out.

use warden_analysis::boundaries::load_rules;
use warden_analysis::matchers::AccessOperation;
use warden_analysis::pipeline::{BoundaryAnalyzer, SourceFile};
use warden_analysis::sensitive::SensitivityType;
use warden_core::config::{ConfidenceWeights, ScanConfig};
use warden_core::errors::{PipelineError, ScanError};

#[test]
fn supabase_read_discovers_table_fields_and_sensitivity() {
    let analyzer = BoundaryAnalyzer::with_defaults();
    let files = vec![SourceFile::new(
        "app/users.ts",
        "const rows = await supabase.from('users').select('id,ssn');",
    )];

    let result = analyzer.scan(&files, None).unwrap();

    assert_eq!(result.stats.files_scanned, 1);
    assert_eq!(result.stats.access_points_found, 1);
    let point = result.map.access_points.values().next().unwrap();
    assert_eq!(point.table, "users");
    assert_eq!(point.fields, vec!["id", "ssn"]);
    assert_eq!(point.operation, AccessOperation::Read);
    assert_eq!(point.framework, "supabase");
    assert!((0.0..=1.0).contains(&point.confidence));

    let ssn = result.map.sensitivity_of("ssn").expect("ssn classified");
    assert_eq!(ssn.sensitivity, SensitivityType::Pii);
}

#[test]
fn polyglot_scan_collects_points_from_every_language() {
    let analyzer = BoundaryAnalyzer::with_defaults();
    let files = vec![
        SourceFile::new(
            "svc/a.ts",
            "await prisma.user.findMany({ where: { email: 'x' } });",
        ),
        SourceFile::new("svc/b.py", "User.objects.filter(email=address)\n"),
        SourceFile::new("svc/c.rb", "Order.where(status: 'open').first\n"),
        SourceFile::new(
            "svc/d.go",
            "package main\n\nfunc load() {\n    db.Table(\"invoices\").Find(&rows)\n}\n",
        ),
        SourceFile::new("svc/e.php", "<?php\nDB::table('carts')->get();\n"),
    ];

    let result = analyzer.scan(&files, None).unwrap();

    assert_eq!(result.stats.files_scanned, 5);
    assert_eq!(result.failures.len(), 0);
    let frameworks: Vec<&str> = result
        .map
        .access_points
        .values()
        .map(|p| p.framework.as_str())
        .collect();
    for expected in ["prisma", "django", "active-record", "gorm", "eloquent"] {
        assert!(frameworks.contains(&expected), "missing {expected}");
    }
    assert!(result.map.tables.contains_key("users"));
    assert!(result.map.tables.contains_key("invoices"));
    assert!(result.map.tables.contains_key("carts"));
}

#[test]
fn broken_file_is_excluded_and_counted_not_fatal() {
    let analyzer = BoundaryAnalyzer::with_defaults();
    let files = vec![
        SourceFile::new("ok.ts", "supabase.from('users').select('id');"),
        SourceFile::new("broken.ts", "const = = (((;"),
        SourceFile::new("notes.txt", "not source code"),
    ];

    let result = analyzer.scan(&files, None).unwrap();

    assert_eq!(result.stats.files_scanned, 1);
    assert_eq!(result.stats.files_failed, 2);
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.stats.access_points_found, 1);
}

#[test]
fn nested_query_argument_produces_its_own_point() {
    let analyzer = BoundaryAnalyzer::with_defaults();
    let files = vec![SourceFile::new(
        "app.ts",
        "logger.record(knex('audit_log').insert({ actor: 'x' }));",
    )];

    let result = analyzer.scan(&files, None).unwrap();

    assert_eq!(result.stats.access_points_found, 1);
    let point = result.map.access_points.values().next().unwrap();
    assert_eq!(point.table, "audit_log");
    assert_eq!(point.operation, AccessOperation::Write);
}

#[test]
fn policy_violations_reported_end_to_end() {
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
    let analyzer = BoundaryAnalyzer::with_defaults();
    let files = vec![
        SourceFile::new(
            "services/billing/charge.ts",
            "supabase.from('payments').insert({ amount: 1 });",
        ),
        SourceFile::new(
            "services/reports/summary.ts",
            "supabase.from('payments').select('amount');",
        ),
    ];

    let result = analyzer.scan(&files, Some(&rules)).unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].file, "services/reports/summary.ts");
    assert_eq!(result.stats.violations_found, 1);
}

#[test]
fn cancelled_scan_surfaces_cancellation() {
    let analyzer = BoundaryAnalyzer::with_defaults();
    analyzer.cancellation().cancel();
    let files = vec![SourceFile::new("a.ts", "supabase.from('users').select('id');")];

    let err = analyzer.scan(&files, None).unwrap_err();
    assert!(matches!(err, PipelineError::Scan(ScanError::Cancelled)));

    analyzer.cancellation().reset();
    assert!(analyzer.scan(&files, None).is_ok());
}

#[test]
fn rescan_of_unchanged_source_is_reproducible() {
    let analyzer = BoundaryAnalyzer::with_defaults();
    let files = vec![
        SourceFile::new("a.ts", "supabase.from('users').select('id,email');"),
        SourceFile::new("b.py", "Account.objects.filter(owner_id=uid)\n"),
    ];

    let first = analyzer.scan(&files, None).unwrap();
    let second = analyzer.scan(&files, None).unwrap();

    assert_eq!(
        serde_json::to_string(&first.map.access_points).unwrap(),
        serde_json::to_string(&second.map.access_points).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.map.tables).unwrap(),
        serde_json::to_string(&second.map.tables).unwrap()
    );
}

#[test]
fn invalid_configuration_rejected_at_startup() {
    let bad_weights = ConfidenceWeights {
        table_name: 0.9,
        ..ConfidenceWeights::default()
    };
    assert!(BoundaryAnalyzer::new(ScanConfig::default(), bad_weights).is_err());

    let bad_config = ScanConfig {
        max_chain_depth: Some(0),
        ..Default::default()
    };
    assert!(BoundaryAnalyzer::new(bad_config, ConfidenceWeights::default()).is_err());
}
