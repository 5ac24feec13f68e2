//! SQLAlchemy: `session.query(User).filter_by(email=x).all()`. Raw
//! `session.execute("...")` is deliberately left for the SQL fallback.

use crate::normalize::chain::{NormalizedArg, UnifiedCallChain};
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, strip_lookup, PatternMatcher};

pub struct SqlAlchemyMatcher;

impl PatternMatcher for SqlAlchemyMatcher {
    fn id(&self) -> &'static str {
        "sqlalchemy"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn priority(&self) -> i32 {
        90
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let query = chain.segment("query").filter(|s| s.is_call)?;
        let model = query.args.iter().find_map(|arg| match arg {
            NormalizedArg::Identifier { name } => Some(name.clone()),
            _ => None,
        })?;
        if !model.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return None;
        }

        let query_idx = chain.segment_index("query")?;
        let mut operation = AccessOperation::Read;
        let mut fields = Vec::new();
        for segment in &chain.segments[query_idx + 1..] {
            if !segment.is_call {
                continue;
            }
            match segment.name.as_str() {
                "delete" => operation = AccessOperation::Delete,
                "update" => {
                    operation = AccessOperation::Write;
                    for arg in &segment.args {
                        for key in arg.object_keys() {
                            fields.push(key.to_string());
                        }
                    }
                }
                "filter_by" => {
                    for arg in &segment.args {
                        for key in arg.object_keys() {
                            fields.push(strip_lookup(key).to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "sqlalchemy".to_string(),
            table: conventional_table(&model),
            table_source: TableSource::Inferred,
            fields,
            operation,
            operation_clear: true,
            confidence: 0.8,
            is_raw_sql: false,
            from_literal: false,
            generic_fallback: false,
            model: Some(model),
            metadata: None,
        })
    }
}
