//! Mongoose models: `User.findOne({ email })`. The receiver is the
//! model; the collection name is inferred by convention.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, PatternMatcher};

const READ_METHODS: &[&str] = &[
    "find",
    "findOne",
    "findById",
    "countDocuments",
    "estimatedDocumentCount",
    "distinct",
    "aggregate",
    "exists",
];
const WRITE_METHODS: &[&str] = &[
    "create",
    "insertMany",
    "updateOne",
    "updateMany",
    "replaceOne",
    "findOneAndUpdate",
    "findByIdAndUpdate",
];
const DELETE_METHODS: &[&str] = &[
    "deleteOne",
    "deleteMany",
    "findOneAndDelete",
    "findByIdAndDelete",
];

pub struct MongooseMatcher;

impl PatternMatcher for MongooseMatcher {
    fn id(&self) -> &'static str {
        "mongoose"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::TypeScript, Language::JavaScript]
    }

    fn priority(&self) -> i32 {
        85
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let model = chain.receiver.clone();
        if !model.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return None;
        }

        let method = chain.segments.first().filter(|s| s.is_call)?;
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
            for key in arg.object_keys() {
                if !key.starts_with('$') {
                    fields.push(key.to_string());
                }
            }
        }
        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "mongoose".to_string(),
            table: conventional_table(&model),
            table_source: TableSource::Inferred,
            fields,
            operation,
            operation_clear: true,
            confidence: 0.7,
            is_raw_sql: false,
            from_literal: false,
            generic_fallback: false,
            model: Some(model),
            metadata: None,
        })
    }
}
