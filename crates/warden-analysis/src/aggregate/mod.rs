//! Access-map aggregation: a pure reduction over the complete set of
//! per-file points. No incremental merges; the map is rebuilt whole so
//! stale entries cannot survive a rescan.

pub mod types;

use std::collections::BTreeMap;

use xxhash_rust::xxh3::xxh3_64;

use crate::matchers::AccessOperation;
use crate::sensitive::{SensitiveField, SensitivityClassifier};
use crate::types::FxHashSet;
pub use types::{DataAccessMap, DataAccessPoint, FileAccessInfo, ScanStats, TableAccessInfo};

/// Build the map from every point the scan produced.
///
/// Points are sorted before id assignment, so the same source always
/// yields the same ids regardless of worker completion order.
pub fn build_access_map(
    mut points: Vec<DataAccessPoint>,
    classifier: &dyn SensitivityClassifier,
) -> DataAccessMap {
    points.sort_by(|a, b| {
        (&a.file, a.line, a.column, &a.table, a.operation)
            .cmp(&(&b.file, b.line, b.column, &b.table, b.operation))
    });
    assign_ids(&mut points);

    let mut map = DataAccessMap::empty();

    for point in &points {
        let table_info = map
            .tables
            .entry(point.table.clone())
            .or_insert_with(|| TableAccessInfo {
                table: point.table.clone(),
                ..Default::default()
            });
        table_info.accessed_by.push(point.id.clone());
        table_info.files.push(point.file.clone());
        match point.operation {
            AccessOperation::Read => table_info.reads += 1,
            AccessOperation::Write => table_info.writes += 1,
            AccessOperation::Delete => table_info.deletes += 1,
            AccessOperation::Unknown => {}
        }

        let file_info = map
            .files
            .entry(point.file.clone())
            .or_insert_with(|| FileAccessInfo {
                file: point.file.clone(),
                ..Default::default()
            });
        file_info.access_points.push(point.id.clone());
        file_info.tables.push(point.table.clone());

        if let Some(model) = &point.model {
            map.models.push(model.clone());
        }
    }

    for table_info in map.tables.values_mut() {
        table_info.accessed_by.sort();
        table_info.files.sort();
        table_info.files.dedup();
    }
    for file_info in map.files.values_mut() {
        file_info.access_points.sort();
        file_info.tables.sort();
        file_info.tables.dedup();
    }
    map.models.sort();
    map.models.dedup();

    map.sensitive_fields = classify_fields(&points, classifier);

    map.stats.tables_found = map.tables.len() as u32;
    map.stats.access_points_found = points.len() as u32;
    map.stats.sensitive_fields_found = map.sensitive_fields.len() as u32;

    map.access_points = points
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect::<BTreeMap<_, _>>();

    map
}

/// Stable ids from the identity tuple; a collision (two points with the
/// same tuple) gets a positional suffix so ids stay unique.
fn assign_ids(points: &mut [DataAccessPoint]) {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for point in points.iter_mut() {
        let key = format!(
            "{}:{}:{}:{}:{}",
            point.file, point.line, point.column, point.table, point.operation
        );
        let mut id = format!("{:016x}", xxh3_64(key.as_bytes()));
        let mut suffix = 1u32;
        while seen.contains(&id) {
            id = format!("{:016x}-{suffix}", xxh3_64(key.as_bytes()));
            suffix += 1;
        }
        seen.insert(id.clone());
        point.id = id;
    }
}

/// Run the classifier once per distinct (field, table) pair, sorted so
/// output order is stable.
fn classify_fields(
    points: &[DataAccessPoint],
    classifier: &dyn SensitivityClassifier,
) -> Vec<SensitiveField> {
    let mut pairs: Vec<(String, Option<String>)> = Vec::new();
    let mut seen: FxHashSet<(String, Option<String>)> = FxHashSet::default();
    for point in points {
        let table = if point.table == "unknown" {
            None
        } else {
            Some(point.table.clone())
        };
        for field in &point.fields {
            let pair = (field.clone(), table.clone());
            if seen.insert(pair.clone()) {
                pairs.push(pair);
            }
        }
    }
    pairs.sort();

    pairs
        .into_iter()
        .filter_map(|(field, table)| {
            classifier.classify(&field).map(|hit| SensitiveField {
                field,
                table,
                sensitivity: hit.sensitivity,
                confidence: hit.confidence,
                matched_pattern: hit.matched_pattern,
            })
        })
        .collect()
}
