//! Framework pattern matchers and the priority-ordered registry.
//!
//! A matcher inspects one normalized chain and either claims it with a
//! [`PatternMatchResult`] or declines. The registry consults matchers
//! for the chain's language in priority order and takes the first claim;
//! the raw-SQL fallback sits at priority zero so a framework matcher
//! always wins over a string that merely looks like SQL.

pub mod types;

mod active_record;
mod django;
mod ef_core;
mod eloquent;
mod gorm;
mod hibernate;
mod knex;
mod mongoose;
mod prisma;
mod raw_sql;
mod sequelize;
mod sqlalchemy;
mod supabase;
mod typeorm;

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::normalize::chain::UnifiedCallChain;
use crate::scanner::Language;
use crate::types::FxHashMap;
pub use types::{AccessOperation, PatternMatchResult, TableSource};

/// One framework recognizer.
///
/// Implementations must be pure over the chain: no I/O, no shared
/// mutable state. A panicking matcher is isolated by the registry and
/// skipped for that chain.
pub trait PatternMatcher: Send + Sync {
    /// Stable identifier, used for deterministic tie-breaking and logs.
    fn id(&self) -> &'static str;

    /// Languages this matcher understands.
    fn languages(&self) -> &'static [Language];

    /// Higher priority is consulted first; ties break on `id` ascending.
    fn priority(&self) -> i32;

    fn match_chain(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult>;
}

/// Matchers indexed by language, consulted in fixed priority order.
pub struct MatcherRegistry {
    matchers: Vec<Box<dyn PatternMatcher>>,
    /// Indices into `matchers`, per language, already in consult order.
    language_index: FxHashMap<Language, Vec<usize>>,
}

impl MatcherRegistry {
    /// Build a registry from the given matchers. Ordering is fixed here,
    /// once, so resolution is deterministic for the whole scan.
    pub fn new(mut matchers: Vec<Box<dyn PatternMatcher>>) -> Self {
        matchers.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.id().cmp(b.id()))
        });

        let mut language_index: FxHashMap<Language, Vec<usize>> = FxHashMap::default();
        for (idx, matcher) in matchers.iter().enumerate() {
            for language in matcher.languages() {
                language_index.entry(*language).or_default().push(idx);
            }
        }

        Self {
            matchers,
            language_index,
        }
    }

    /// A registry holding every built-in matcher plus the raw-SQL
    /// fallback.
    pub fn with_builtins() -> Self {
        Self::new(vec![
            Box::new(supabase::SupabaseMatcher),
            Box::new(prisma::PrismaMatcher),
            Box::new(typeorm::TypeOrmMatcher),
            Box::new(knex::KnexMatcher),
            Box::new(mongoose::MongooseMatcher),
            Box::new(sequelize::SequelizeMatcher),
            Box::new(django::DjangoOrmMatcher),
            Box::new(sqlalchemy::SqlAlchemyMatcher),
            Box::new(active_record::ActiveRecordMatcher),
            Box::new(hibernate::HibernateMatcher),
            Box::new(ef_core::EfCoreMatcher),
            Box::new(gorm::GormMatcher),
            Box::new(eloquent::EloquentMatcher),
            Box::new(raw_sql::RawSqlMatcher::new()),
        ])
    }

    /// Resolve one chain: first claim wins. A matcher that panics is
    /// logged and skipped, never aborting the file or the scan.
    pub fn resolve(&self, chain: &UnifiedCallChain) -> Option<PatternMatchResult> {
        let indices = self.language_index.get(&chain.language)?;
        for &idx in indices {
            let matcher = &self.matchers[idx];
            match catch_unwind(AssertUnwindSafe(|| matcher.match_chain(chain))) {
                Ok(Some(result)) => return Some(result),
                Ok(None) => {}
                Err(_) => {
                    warn!(
                        matcher = matcher.id(),
                        file = %chain.span.file,
                        line = chain.span.start_line,
                        "matcher panicked; skipping for this chain"
                    );
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Matcher ids in consult order for a language, for diagnostics.
    pub fn consult_order(&self, language: Language) -> Vec<&'static str> {
        self.language_index
            .get(&language)
            .map(|indices| indices.iter().map(|&i| self.matchers[i].id()).collect())
            .unwrap_or_default()
    }
}

impl Default for MatcherRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Split a projection string like `"id, email, ssn"` into field names.
/// Supabase-style embedded resources (`author(name)`) keep only the top
/// level.
pub(crate) fn split_projection(projection: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in projection.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_field(&mut fields, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        if depth == 0 && ch != '(' && ch != ')' {
            current.push(ch);
        }
    }
    push_field(&mut fields, &current);
    fields
}

fn push_field(fields: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed != "*" {
        fields.push(trimmed.to_string());
    }
}

/// Strip Django-style `__lookup` suffixes from a kwarg key.
pub(crate) fn strip_lookup(key: &str) -> &str {
    match key.find("__") {
        Some(pos) if pos > 0 => &key[..pos],
        _ => key,
    }
}

/// Lowercase a model name and pluralize it naively, the common ORM
/// table-name convention.
pub(crate) fn conventional_table(model: &str) -> String {
    let lower = model.to_lowercase();
    if lower.ends_with('s') {
        lower
    } else if lower.ends_with('y') {
        format!("{}ies", &lower[..lower.len() - 1])
    } else {
        format!("{lower}s")
    }
}
