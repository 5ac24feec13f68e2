//! Knex query builder: `knex('users').where({ id }).select('email')`.
//! The builder is invoked directly with the table name.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::PatternMatcher;

pub struct KnexMatcher;

impl PatternMatcher for KnexMatcher {
    fn id(&self) -> &'static str {
        "knex"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::TypeScript, Language::JavaScript]
    }

    fn priority(&self) -> i32 {
        88
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        if chain.receiver != "knex" {
            return None;
        }
        // The root segment is the builder invocation itself.
        let root = chain.segments.first().filter(|s| s.is_call && s.name == "knex")?;
        let table = root.first_string_arg()?.to_string();

        let mut operation = AccessOperation::Unknown;
        let mut fields = Vec::new();
        for segment in &chain.segments[1..] {
            if !segment.is_call {
                continue;
            }
            match segment.name.as_str() {
                "select" | "first" | "pluck" | "count" | "min" | "max" | "sum" | "avg" => {
                    if operation == AccessOperation::Unknown {
                        operation = AccessOperation::Read;
                    }
                    for column in segment.string_args() {
                        fields.push(column.to_string());
                    }
                }
                "insert" | "update" | "increment" | "decrement" | "onConflict" | "merge" => {
                    operation = AccessOperation::Write;
                    for arg in &segment.args {
                        for key in arg.object_keys() {
                            fields.push(key.to_string());
                        }
                    }
                }
                "del" | "delete" | "truncate" => operation = AccessOperation::Delete,
                "where" | "andWhere" | "orWhere" | "whereIn" | "whereNot" => {
                    if let Some(column) = segment.first_string_arg() {
                        fields.push(column.to_string());
                    }
                    for arg in &segment.args {
                        for key in arg.object_keys() {
                            fields.push(key.to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "knex".to_string(),
            table,
            table_source: TableSource::Literal,
            fields,
            operation_clear: operation != AccessOperation::Unknown,
            operation,
            confidence: 0.85,
            is_raw_sql: false,
            from_literal: true,
            generic_fallback: false,
            model: None,
            metadata: None,
        })
    }
}
