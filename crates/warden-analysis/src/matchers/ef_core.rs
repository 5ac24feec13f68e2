//! Entity Framework Core: `_context.Users.Where(...).ToListAsync()`.
//! The DbSet property names the table directly.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::PatternMatcher;

const READ_METHODS: &[&str] = &[
    "Where",
    "First",
    "FirstOrDefault",
    "FirstOrDefaultAsync",
    "FirstAsync",
    "Single",
    "SingleOrDefault",
    "SingleOrDefaultAsync",
    "ToList",
    "ToListAsync",
    "ToArrayAsync",
    "Find",
    "FindAsync",
    "Count",
    "CountAsync",
    "Any",
    "AnyAsync",
    "Select",
    "Include",
    "OrderBy",
];
const WRITE_METHODS: &[&str] = &["Add", "AddAsync", "AddRange", "AddRangeAsync", "Update", "UpdateRange", "Attach"];
const DELETE_METHODS: &[&str] = &["Remove", "RemoveRange", "ExecuteDelete", "ExecuteDeleteAsync"];

pub struct EfCoreMatcher;

impl PatternMatcher for EfCoreMatcher {
    fn id(&self) -> &'static str {
        "ef-core"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::CSharp]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let receiver = chain.receiver.trim_start_matches('_').to_lowercase();
        if !receiver.contains("context") && receiver != "db" {
            return None;
        }

        // The DbSet is the first property segment after the context.
        let db_set = chain.segments.iter().find(|s| !s.is_call)?;
        if !db_set
            .name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
        {
            return None;
        }

        let mut operation = AccessOperation::Unknown;
        for segment in &chain.segments {
            if !segment.is_call {
                continue;
            }
            let name = segment.name.as_str();
            if DELETE_METHODS.contains(&name) {
                operation = AccessOperation::Delete;
            } else if WRITE_METHODS.contains(&name) {
                operation = AccessOperation::Write;
            } else if READ_METHODS.contains(&name) && operation == AccessOperation::Unknown {
                operation = AccessOperation::Read;
            }
        }
        if operation == AccessOperation::Unknown {
            return None;
        }

        Some(PatternMatchResult {
            orm: "ef-core".to_string(),
            table: db_set.name.to_lowercase(),
            table_source: TableSource::Inferred,
            fields: Vec::new(),
            operation,
            operation_clear: true,
            confidence: 0.8,
            is_raw_sql: false,
            from_literal: false,
            generic_fallback: false,
            model: Some(db_set.name.clone()),
            metadata: None,
        })
    }
}
