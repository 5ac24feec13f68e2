//! GORM: `db.Table("users").Where("email = ?", e).Find(&users)`.
//! Chains with a `Raw` segment are declined so the SQL fallback can
//! extract the real table from the query text.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::PatternMatcher;

pub struct GormMatcher;

impl PatternMatcher for GormMatcher {
    fn id(&self) -> &'static str {
        "gorm"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Go]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        if !chain.receiver.to_lowercase().contains("db") {
            return None;
        }
        if chain.segment("Raw").is_some() || chain.segment("Exec").is_some() {
            return None;
        }

        let (table, table_source, from_literal) = match chain
            .segment("Table")
            .and_then(|s| s.first_string_arg())
        {
            Some(name) => (name.to_string(), TableSource::Literal, true),
            None => (
                PatternMatchResult::UNKNOWN_TABLE.to_string(),
                TableSource::Absent,
                false,
            ),
        };

        let mut operation = AccessOperation::Unknown;
        let mut fields = Vec::new();
        for segment in &chain.segments {
            if !segment.is_call {
                continue;
            }
            match segment.name.as_str() {
                "Find" | "First" | "Last" | "Take" | "Count" | "Scan" | "Rows" | "Pluck" => {
                    if operation == AccessOperation::Unknown {
                        operation = AccessOperation::Read;
                    }
                }
                "Create" | "Save" | "Update" | "Updates" | "UpdateColumn" => {
                    operation = AccessOperation::Write;
                    if segment.name == "Update" {
                        if let Some(column) = segment.first_string_arg() {
                            fields.push(column.to_string());
                        }
                    }
                }
                "Delete" => operation = AccessOperation::Delete,
                "Where" | "Or" | "Not" => {
                    if let Some(clause) = segment.first_string_arg() {
                        if let Some(column) = leading_column(clause) {
                            fields.push(column);
                        }
                    }
                }
                "Select" => {
                    for clause in segment.string_args() {
                        for part in clause.split(',') {
                            let part = part.trim();
                            if !part.is_empty() && part != "*" {
                                fields.push(part.to_string());
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        if operation == AccessOperation::Unknown {
            return None;
        }

        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "gorm".to_string(),
            table,
            table_source,
            fields,
            operation,
            operation_clear: true,
            confidence: 0.8,
            is_raw_sql: false,
            from_literal,
            generic_fallback: false,
            model: None,
            metadata: None,
        })
    }
}

/// The column a clause like `"email = ?"` constrains.
fn leading_column(clause: &str) -> Option<String> {
    let token: String = clause
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
