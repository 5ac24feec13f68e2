//! Raw-SQL fallback: scans string arguments anywhere in the chain for
//! SQL verbs and extracts the table from the statement text. Priority
//! zero, so every framework matcher is consulted first.

use regex::Regex;

use crate::normalize::chain::{NormalizedArg, UnifiedCallChain};
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::PatternMatcher;

const ALL_LANGUAGES: &[Language] = &[
    Language::TypeScript,
    Language::JavaScript,
    Language::Python,
    Language::Java,
    Language::CSharp,
    Language::Go,
    Language::Ruby,
    Language::Php,
];

pub struct RawSqlMatcher {
    select: Regex,
    insert: Regex,
    update: Regex,
    delete: Regex,
}

impl RawSqlMatcher {
    pub fn new() -> Self {
        // The patterns are fixed and known-good; construction cannot fail.
        Self {
            select: Regex::new(r"(?is)SELECT\s+(.+?)\s+FROM\s+([a-zA-Z_][a-zA-Z0-9_]*)").unwrap(),
            insert: Regex::new(r"(?is)INSERT\s+INTO\s+([a-zA-Z_][a-zA-Z0-9_]*)").unwrap(),
            update: Regex::new(r"(?is)UPDATE\s+([a-zA-Z_][a-zA-Z0-9_]*)\s+SET").unwrap(),
            delete: Regex::new(r"(?is)DELETE\s+FROM\s+([a-zA-Z_][a-zA-Z0-9_]*)").unwrap(),
        }
    }

    fn classify(&self, sql: &str) -> Option<(String, Vec<String>, AccessOperation)> {
        if let Some(captures) = self.insert.captures(sql) {
            return Some((captures[1].to_string(), Vec::new(), AccessOperation::Write));
        }
        if let Some(captures) = self.update.captures(sql) {
            return Some((captures[1].to_string(), Vec::new(), AccessOperation::Write));
        }
        if let Some(captures) = self.delete.captures(sql) {
            return Some((captures[1].to_string(), Vec::new(), AccessOperation::Delete));
        }
        if let Some(captures) = self.select.captures(sql) {
            let fields = captures[1]
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty() && *f != "*" && !f.contains('('))
                .map(|f| f.rsplit('.').next().unwrap_or(f).to_string())
                .collect();
            return Some((captures[2].to_string(), fields, AccessOperation::Read));
        }
        None
    }
}

impl Default for RawSqlMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for RawSqlMatcher {
    fn id(&self) -> &'static str {
        "raw-sql"
    }

    fn languages(&self) -> &'static [Language] {
        ALL_LANGUAGES
    }

    fn priority(&self) -> i32 {
        0
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        for segment in &chain.segments {
            for arg in &segment.args {
                let Some(sql) = string_value(arg) else {
                    continue;
                };
                if let Some((table, fields, operation)) = self.classify(sql) {
                    return Some(PatternMatchResult {
                        orm: "raw-sql".to_string(),
                        table: table.to_lowercase(),
                        table_source: TableSource::Literal,
                        fields,
                        operation,
                        operation_clear: true,
                        confidence: 0.6,
                        is_raw_sql: true,
                        from_literal: true,
                        generic_fallback: true,
                        model: None,
                        metadata: Some(serde_json::json!({
                            "sql": sql.chars().take(120).collect::<String>(),
                        })),
                    });
                }
            }
        }
        None
    }
}

fn string_value(arg: &NormalizedArg) -> Option<&str> {
    match arg {
        NormalizedArg::String { value } => Some(value),
        _ => None,
    }
}
