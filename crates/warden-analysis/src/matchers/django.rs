//! Django ORM: `User.objects.filter(email=x)`. The `objects` manager
//! marks the pattern; the table name is inferred from the model.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, strip_lookup, PatternMatcher};

const READ_METHODS: &[&str] = &[
    "filter", "get", "all", "exclude", "values", "values_list", "annotate", "aggregate", "count",
    "first", "last", "exists", "only", "defer", "order_by",
];
const WRITE_METHODS: &[&str] = &[
    "create",
    "update",
    "get_or_create",
    "update_or_create",
    "bulk_create",
    "bulk_update",
];
const DELETE_METHODS: &[&str] = &["delete"];

pub struct DjangoOrmMatcher;

impl PatternMatcher for DjangoOrmMatcher {
    fn id(&self) -> &'static str {
        "django"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let objects_idx = chain
            .segments
            .iter()
            .position(|s| s.name == "objects" && !s.is_call)?;
        let model = if objects_idx == 0 {
            chain.receiver.clone()
        } else {
            chain.segments[objects_idx - 1].name.clone()
        };
        if !model.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return None;
        }

        let mut operation = AccessOperation::Unknown;
        let mut fields = Vec::new();
        for segment in &chain.segments[objects_idx + 1..] {
            if !segment.is_call {
                continue;
            }
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
                    fields.push(strip_lookup(key).to_string());
                }
                if let Some(name) = arg.as_string() {
                    // values('email', 'role') names columns positionally.
                    fields.push(name.to_string());
                }
            }
        }
        if operation == AccessOperation::Unknown {
            return None;
        }

        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "django".to_string(),
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
