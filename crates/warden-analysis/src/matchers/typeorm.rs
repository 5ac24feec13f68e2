//! TypeORM repositories: `getRepository(User).find({ where: ... })` and
//! `userRepository.save(...)`.

use crate::normalize::chain::{NormalizedArg, UnifiedCallChain};
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, PatternMatcher};

const READ_METHODS: &[&str] = &[
    "find",
    "findOne",
    "findOneBy",
    "findBy",
    "findAndCount",
    "findOneOrFail",
    "count",
    "countBy",
    "exists",
];
const WRITE_METHODS: &[&str] = &["save", "insert", "update", "upsert", "increment", "decrement"];
const DELETE_METHODS: &[&str] = &["delete", "remove", "softDelete", "softRemove", "clear"];

pub struct TypeOrmMatcher;

impl PatternMatcher for TypeOrmMatcher {
    fn id(&self) -> &'static str {
        "typeorm"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::TypeScript, Language::JavaScript]
    }

    fn priority(&self) -> i32 {
        90
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let model = resolve_model(chain)?;

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
            if let Some(where_clause) = arg.property("where") {
                for key in where_clause.object_keys() {
                    fields.push(key.to_string());
                }
            } else {
                // findOneBy({ email }) takes the criteria object directly.
                for key in arg.object_keys() {
                    if key != "where" && key != "relations" && key != "order" {
                        fields.push(key.to_string());
                    }
                }
            }
        }
        fields.sort();
        fields.dedup();

        Some(PatternMatchResult {
            orm: "typeorm".to_string(),
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

/// The entity behind the repository: the argument of `getRepository`, or
/// the `fooRepository` naming convention.
fn resolve_model(chain: &UnifiedCallChain) -> Option<String> {
    if let Some(get_repo) = chain.segment("getRepository") {
        for arg in &get_repo.args {
            match arg {
                NormalizedArg::Identifier { name } => return Some(name.clone()),
                NormalizedArg::String { value } => return Some(value.clone()),
                _ => {}
            }
        }
        return None;
    }
    let receiver = chain.receiver.trim_start_matches("this.");
    let stem = receiver.strip_suffix("Repository")?;
    if stem.is_empty() {
        return None;
    }
    let mut model = stem.to_string();
    if let Some(first) = model.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Some(model)
}
