//! JPA/Hibernate: `entityManager.find(User.class, id)` and Spring Data
//! repositories (`userRepository.findByEmail(...)`), whose derived query
//! names encode the fields they filter on.

use crate::normalize::chain::{NormalizedArg, UnifiedCallChain};
use crate::scanner::Language;

use super::types::{AccessOperation, PatternMatchResult, TableSource};
use super::{conventional_table, PatternMatcher};

pub struct HibernateMatcher;

impl PatternMatcher for HibernateMatcher {
    fn id(&self) -> &'static str {
        "hibernate"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Java]
    }

    fn priority(&self) -> i32 {
        100
    }

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let receiver = chain.receiver.to_lowercase();
        if receiver.contains("entitymanager") || receiver == "em" || receiver.contains("session") {
            return match_entity_manager(chain);
        }
        if receiver.ends_with("repository") || receiver.ends_with("dao") {
            return match_repository(chain);
        }
        None
    }
}

fn match_entity_manager(chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
    let method = chain.segments.iter().find(|s| s.is_call)?;
    let operation = match method.name.as_str() {
        "find" | "getReference" | "contains" => AccessOperation::Read,
        "persist" | "merge" | "flush" => AccessOperation::Write,
        "remove" => AccessOperation::Delete,
        _ => return None,
    };

    // find(User.class, id): the entity surfaces as a nested `User.class`
    // chain in argument position.
    let model = method.args.iter().find_map(|arg| match arg {
        NormalizedArg::Call { chain } if chain.segment("class").is_some() => {
            Some(chain.receiver.clone())
        }
        NormalizedArg::Identifier { name } => Some(name.clone()),
        _ => None,
    });

    let (table, table_source) = match &model {
        Some(m) if m.chars().next().is_some_and(|c| c.is_ascii_uppercase()) => {
            (conventional_table(m), TableSource::Inferred)
        }
        _ => (
            PatternMatchResult::UNKNOWN_TABLE.to_string(),
            TableSource::Absent,
        ),
    };

    Some(PatternMatchResult {
        orm: "hibernate".to_string(),
        table,
        table_source,
        fields: Vec::new(),
        operation,
        operation_clear: true,
        confidence: 0.75,
        is_raw_sql: false,
        from_literal: false,
        generic_fallback: false,
        model,
        metadata: None,
    })
}

fn match_repository(chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
    let method = chain.segments.iter().find(|s| s.is_call)?;
    let name = method.name.as_str();

    let (operation, fields) = if let Some(suffix) = name.strip_prefix("findBy") {
        (AccessOperation::Read, derived_query_fields(suffix))
    } else if let Some(suffix) = name.strip_prefix("deleteBy") {
        (AccessOperation::Delete, derived_query_fields(suffix))
    } else if let Some(suffix) = name.strip_prefix("countBy") {
        (AccessOperation::Read, derived_query_fields(suffix))
    } else {
        let operation = match name {
            "findAll" | "findById" | "count" | "existsById" | "getById" => AccessOperation::Read,
            "save" | "saveAll" | "saveAndFlush" => AccessOperation::Write,
            "delete" | "deleteAll" | "deleteById" => AccessOperation::Delete,
            _ => return None,
        };
        (operation, Vec::new())
    };

    let receiver = chain.receiver.trim_start_matches("this.");
    let lower = receiver.to_lowercase();
    let stem_len = if lower.ends_with("repository") {
        receiver.len() - "repository".len()
    } else {
        receiver.len() - "dao".len()
    };
    let model_stem = &receiver[..stem_len];
    let (table, table_source, model) = if model_stem.is_empty() {
        (
            PatternMatchResult::UNKNOWN_TABLE.to_string(),
            TableSource::Absent,
            None,
        )
    } else {
        let mut model = model_stem.to_string();
        if let Some(first) = model.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        (
            conventional_table(&model),
            TableSource::Inferred,
            Some(model),
        )
    };

    Some(PatternMatchResult {
        orm: "hibernate".to_string(),
        table,
        table_source,
        fields,
        operation,
        operation_clear: true,
        confidence: 0.75,
        is_raw_sql: false,
        from_literal: false,
        generic_fallback: false,
        model,
        metadata: None,
    })
}

/// Split a derived-query suffix like `EmailAndStatus` into lowercased
/// field names.
fn derived_query_fields(suffix: &str) -> Vec<String> {
    suffix
        .split("And")
        .flat_map(|part| part.split("Or"))
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut out = String::with_capacity(part.len());
            for (i, ch) in part.chars().enumerate() {
                if ch.is_ascii_uppercase() {
                    if i > 0 {
                        out.push('_');
                    }
                    out.push(ch.to_ascii_lowercase());
                } else {
                    out.push(ch);
                }
            }
            out
        })
        .collect()
}
