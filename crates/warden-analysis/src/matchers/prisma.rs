//! Prisma client: `prisma.user.findMany({ where: { email } })`. The
//! model is the property between the client and the query method; the
//! table name is inferred from it by convention.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, PatternMatcher};

const READ_METHODS: &[&str] = &[
    "findMany",
    "findUnique",
    "findUniqueOrThrow",
    "findFirst",
    "findFirstOrThrow",
    "count",
    "aggregate",
    "groupBy",
];
const WRITE_METHODS: &[&str] = &["create", "createMany", "update", "updateMany", "upsert"];
const DELETE_METHODS: &[&str] = &["delete", "deleteMany"];

pub struct PrismaMatcher;

impl PatternMatcher for PrismaMatcher {
    fn id(&self) -> &'static str {
        "prisma"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::TypeScript, Language::JavaScript]
    }

    fn priority(&self) -> i32 {
        95
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let receiver_is_client = chain.receiver.to_lowercase().contains("prisma");
        let model = if receiver_is_client {
            // prisma.user.findMany(...): the model is the first property
            // segment.
            chain.segments.iter().find(|s| !s.is_call)?.name.clone()
        } else {
            // this.prisma.user.findMany(...)
            let idx = chain.segment_index("prisma")?;
            chain.segments[idx + 1..]
                .iter()
                .find(|s| !s.is_call)?
                .name
                .clone()
        };

        let method = chain.last_call()?;
        let operation = if READ_METHODS.contains(&method.name.as_str()) {
            AccessOperation::Read
        } else if WRITE_METHODS.contains(&method.name.as_str()) {
            AccessOperation::Write
        } else if DELETE_METHODS.contains(&method.name.as_str()) {
            AccessOperation::Delete
        } else {
            return None;
        };

        let mut fields = Vec::new();
        for arg in &method.args {
            for section in ["select", "data", "where"] {
                if let Some(value) = arg.property(section) {
                    for key in value.object_keys() {
                        fields.push(key.to_string());
                    }
                }
            }
        }
        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "prisma".to_string(),
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
