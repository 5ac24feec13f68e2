//! Rule-document loading and validation.
//!
//! The raw document is JSON-shaped and versioned. Validation rejects
//! the entire document on the first structural problem: enforcing a
//! partial policy is worse than enforcing none and alerting.

use glob::Pattern;
use serde::Deserialize;
use warden_core::errors::RuleError;

use crate::matchers::AccessOperation;
use crate::types::FxHashSet;

pub const RULES_VERSION: &str = "1.0";

/// Violation severity, ordered error > warning > info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Sort rank; lower sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// Field-name partition for default-deny style rules. A field in
/// `critical` escalates any violation touching it to error severity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensitivityTiers {
    #[serde(default)]
    pub critical: Vec<String>,
    #[serde(default)]
    pub sensitive: Vec<String>,
    #[serde(default)]
    pub general: Vec<String>,
}

impl SensitivityTiers {
    pub fn is_critical(&self, field: &str) -> bool {
        self.critical.iter().any(|f| f == field)
    }
}

/// One validated rule. Empty `tables`/`fields`/`operations` means the
/// scope dimension is unconstrained.
#[derive(Debug, Clone)]
pub struct BoundaryRule {
    pub id: String,
    pub description: Option<String>,
    pub tables: Vec<String>,
    pub fields: Vec<String>,
    pub operations: Vec<AccessOperation>,
    /// Files permitted to perform the access.
    pub allowed_paths: Vec<Pattern>,
    /// Files this rule never applies to.
    pub exclude_paths: Vec<Pattern>,
    pub severity: Severity,
    pub enabled: bool,
    pub message: Option<String>,
    pub suggestion: Option<String>,
}

/// The validated policy.
#[derive(Debug, Clone)]
pub struct BoundaryRules {
    pub version: String,
    pub tiers: SensitivityTiers,
    pub rules: Vec<BoundaryRule>,
    pub global_excludes: Vec<Pattern>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    version: String,
    #[serde(default)]
    sensitivity: Option<SensitivityTiers>,
    #[serde(default)]
    boundaries: Vec<RawRule>,
    #[serde(default)]
    global_excludes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tables: Vec<String>,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    operations: Vec<String>,
    #[serde(default)]
    allowed_paths: Vec<String>,
    #[serde(default)]
    exclude_paths: Vec<String>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    suggestion: Option<String>,
}

/// Parse and validate a rules document.
pub fn load_rules(json: &str) -> Result<BoundaryRules, RuleError> {
    let raw: RawDocument =
        serde_json::from_str(json).map_err(|e| RuleError::InvalidJson(e.to_string()))?;

    if raw.version != RULES_VERSION {
        return Err(RuleError::UnsupportedVersion(raw.version));
    }

    let tiers = raw.sensitivity.unwrap_or_default();
    check_tiers(&tiers)?;

    let global_excludes = raw
        .global_excludes
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| RuleError::InvalidGlobalExclude {
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen_ids: FxHashSet<String> = FxHashSet::default();
    let mut rules = Vec::with_capacity(raw.boundaries.len());
    for (index, raw_rule) in raw.boundaries.into_iter().enumerate() {
        let rule = validate_rule(raw_rule, index)?;
        if !seen_ids.insert(rule.id.clone()) {
            return Err(RuleError::DuplicateRuleId(rule.id));
        }
        rules.push(rule);
    }

    Ok(BoundaryRules {
        version: RULES_VERSION.to_string(),
        tiers,
        rules,
        global_excludes,
    })
}

fn check_tiers(tiers: &SensitivityTiers) -> Result<(), RuleError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for field in tiers
        .critical
        .iter()
        .chain(tiers.sensitive.iter())
        .chain(tiers.general.iter())
    {
        if !seen.insert(field.as_str()) {
            return Err(RuleError::OverlappingTiers {
                field: field.clone(),
            });
        }
    }
    Ok(())
}

fn validate_rule(raw: RawRule, index: usize) -> Result<BoundaryRule, RuleError> {
    let id = raw.id.unwrap_or_else(|| format!("rule-{}", index + 1));

    if raw.allowed_paths.is_empty() {
        return Err(RuleError::MissingField {
            rule_id: id,
            field: "allowedPaths".to_string(),
        });
    }

    let severity = match raw.severity.as_deref() {
        None => {
            return Err(RuleError::MissingField {
                rule_id: id,
                field: "severity".to_string(),
            })
        }
        Some("error") => Severity::Error,
        Some("warning") => Severity::Warning,
        Some("info") => Severity::Info,
        Some(other) => {
            return Err(RuleError::InvalidSeverity {
                rule_id: id,
                value: other.to_string(),
            })
        }
    };

    let operations = raw
        .operations
        .iter()
        .map(|op| match op.as_str() {
            "read" => Ok(AccessOperation::Read),
            "write" => Ok(AccessOperation::Write),
            "delete" => Ok(AccessOperation::Delete),
            other => Err(RuleError::UnknownOperation {
                rule_id: id.clone(),
                operation: other.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let compile = |patterns: &[String]| -> Result<Vec<Pattern>, RuleError> {
        patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| RuleError::InvalidGlob {
                    rule_id: id.clone(),
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    };
    let allowed_paths = compile(&raw.allowed_paths)?;
    let exclude_paths = compile(&raw.exclude_paths)?;

    Ok(BoundaryRule {
        id,
        description: raw.description,
        tables: raw.tables,
        fields: raw.fields,
        operations,
        allowed_paths,
        exclude_paths,
        severity,
        enabled: raw.enabled.unwrap_or(true),
        message: raw.message,
        suggestion: raw.suggestion,
    })
}
