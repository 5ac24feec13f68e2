//! Rails ActiveRecord: `User.where(email: x).first`. The receiver is a
//! constant; parenless reads like `.first` are still call segments.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, PatternMatcher};

const READ_METHODS: &[&str] = &[
    "where", "find", "find_by", "find_by!", "all", "first", "last", "count", "pluck", "select",
    "exists?", "order", "limit", "includes",
];
const WRITE_METHODS: &[&str] = &[
    "create",
    "create!",
    "update",
    "update!",
    "update_all",
    "upsert",
    "upsert_all",
    "insert_all",
];
const DELETE_METHODS: &[&str] = &["destroy", "destroy_all", "delete", "delete_all"];

pub struct ActiveRecordMatcher;

impl PatternMatcher for ActiveRecordMatcher {
    fn id(&self) -> &'static str {
        "active-record"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Ruby]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let model = chain.receiver.clone();
        if !model.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return None;
        }

        let mut operation = AccessOperation::Unknown;
        let mut fields = Vec::new();
        for segment in &chain.segments {
            let name = segment.name.as_str();
            if DELETE_METHODS.contains(&name) {
                operation = AccessOperation::Delete;
            } else if WRITE_METHODS.contains(&name) {
                operation = AccessOperation::Write;
            } else if READ_METHODS.contains(&name) {
                if operation == AccessOperation::Unknown {
                    operation = AccessOperation::Read;
                }
            } else {
                continue;
            }
            for arg in &segment.args {
                for key in arg.object_keys() {
                    fields.push(key.to_string());
                }
                if matches!(name, "pluck" | "select" | "order") {
                    if let Some(column) = arg.as_string() {
                        fields.push(column.to_string());
                    }
                }
            }
        }
        if operation == AccessOperation::Unknown {
            return None;
        }

        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "active-record".to_string(),
            table: conventional_table(&model),
            table_source: TableSource::Inferred,
            fields,
            operation,
            operation_clear: true,
            confidence: 0.85,
            is_raw_sql: false,
            from_literal: false,
            generic_fallback: false,
            model: Some(model),
            metadata: None,
        })
    }
}
