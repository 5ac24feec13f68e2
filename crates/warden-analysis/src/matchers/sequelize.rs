//! Sequelize models: `User.findAll({ where: { role } })`.

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, PatternMatcher};

const READ_METHODS: &[&str] = &[
    "findAll",
    "findOne",
    "findByPk",
    "findAndCountAll",
    "findOrCreate",
    "count",
    "max",
    "min",
    "sum",
];
const WRITE_METHODS: &[&str] = &["create", "bulkCreate", "update", "upsert", "increment"];
const DELETE_METHODS: &[&str] = &["destroy", "truncate"];

pub struct SequelizeMatcher;

impl PatternMatcher for SequelizeMatcher {
    fn id(&self) -> &'static str {
        "sequelize"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::TypeScript, Language::JavaScript]
    }

    fn priority(&self) -> i32 {
        80
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
            for section in ["where", "attributes"] {
                if let Some(value) = arg.property(section) {
                    for key in value.object_keys() {
                        fields.push(key.to_string());
                    }
                    if let crate::normalize::chain::NormalizedArg::Array { elements } = value {
                        for element in elements {
                            if let Some(name) = element.as_string() {
                                fields.push(name.to_string());
                            }
                        }
                    }
                }
            }
            // create({ email: ... }) takes column values directly.
            if operation == AccessOperation::Write && arg.property("where").is_none() {
                for key in arg.object_keys() {
                    fields.push(key.to_string());
                }
            }
        }
        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "sequelize".to_string(),
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
