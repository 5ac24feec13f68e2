//! Laravel Eloquent: `User::where('email', $e)->first()` and the query
//! builder `DB::table('users')->get()`.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, PatternMatcher};

const READ_METHODS: &[&str] = &[
    "get", "first", "find", "findOrFail", "all", "pluck", "count", "value", "exists", "paginate",
];
const WRITE_METHODS: &[&str] = &["insert", "create", "update", "updateOrCreate", "upsert", "save", "increment"];
const DELETE_METHODS: &[&str] = &["delete", "destroy", "truncate", "forceDelete"];

pub struct EloquentMatcher;

impl PatternMatcher for EloquentMatcher {
    fn id(&self) -> &'static str {
        "eloquent"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Php]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let (table, table_source, from_literal, model) = if chain.receiver == "DB" {
            let table = chain
                .segment("table")
                .filter(|s| s.is_call)
                .and_then(|s| s.first_string_arg())?
                .to_string();
            (table, TableSource::Literal, true, None)
        } else if chain
            .receiver
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
        {
            let model = chain.receiver.clone();
            (
                conventional_table(&model),
                TableSource::Inferred,
                false,
                Some(model),
            )
        } else {
            return None;
        };

        let mut operation = AccessOperation::Unknown;
        let mut fields = Vec::new();
        for segment in &chain.segments {
            if !segment.is_call {
                continue;
            }
            let name = segment.name.as_str();
            if DELETE_METHODS.contains(&name) {
                operation = AccessOperation::Delete;
            } else if WRITE_METHODS.contains(&name) {
                operation = AccessOperation::Write;
                for arg in &segment.args {
                    for key in arg.object_keys() {
                        fields.push(key.to_string());
                    }
                }
            } else if READ_METHODS.contains(&name) {
                if operation == AccessOperation::Unknown {
                    operation = AccessOperation::Read;
                }
                if name == "pluck" || name == "value" {
                    if let Some(column) = segment.first_string_arg() {
                        fields.push(column.to_string());
                    }
                }
            } else if matches!(name, "where" | "orWhere" | "whereIn" | "whereNull") {
                if let Some(column) = segment.first_string_arg() {
                    fields.push(column.to_string());
                }
            }
        }
        if operation == AccessOperation::Unknown {
            return None;
        }

        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "eloquent".to_string(),
            table,
            table_source,
            fields,
            operation,
            operation_clear: true,
            confidence: 0.85,
            is_raw_sql: false,
            from_literal,
            generic_fallback: false,
            model,
            metadata: None,
        })
    }
}
