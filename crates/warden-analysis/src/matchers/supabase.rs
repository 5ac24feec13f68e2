//! Supabase client: `supabase.from('users').select('id,email')`.
//! The table is always a string literal to `.from(...)`.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{split_projection, PatternMatcher};

pub struct SupabaseMatcher;

impl PatternMatcher for SupabaseMatcher {
    fn id(&self) -> &'static str {
        "supabase"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::TypeScript, Language::JavaScript]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let from = chain.segment("from").filter(|s| s.is_call)?;
        let table = from.first_string_arg()?.to_string();

        let mut operation = AccessOperation::Unknown;
        let mut fields: Vec<String> = Vec::new();
        let from_idx = chain.segment_index("from")?;

        for segment in &chain.segments[from_idx + 1..] {
            if !segment.is_call {
                continue;
            }
            match segment.name.as_str() {
                "select" => {
                    if operation == AccessOperation::Unknown {
                        operation = AccessOperation::Read;
                    }
                    if let Some(projection) = segment.first_string_arg() {
                        fields.extend(split_projection(projection));
                    }
                }
                "insert" | "upsert" | "update" => {
                    operation = AccessOperation::Write;
                    for arg in &segment.args {
                        for key in arg.object_keys() {
                            fields.push(key.to_string());
                        }
                    }
                }
                "delete" => operation = AccessOperation::Delete,
                // Filters name the column they constrain.
                "eq" | "neq" | "gt" | "gte" | "lt" | "lte" | "like" | "ilike" | "is" | "in" => {
                    if let Some(column) = segment.first_string_arg() {
                        fields.push(column.to_string());
                    }
                }
                _ => {}
            }
        }

        if operation == AccessOperation::Unknown && !chain.receiver.to_lowercase().contains("supabase")
        {
            return None;
        }

        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "supabase".to_string(),
            table,
            table_source: TableSource::Literal,
            fields,
            operation_clear: operation != AccessOperation::Unknown,
            operation,
            confidence: 0.9,
            is_raw_sql: false,
            from_literal: true,
            generic_fallback: false,
            model: None,
            metadata: None,
        })
    }
}
