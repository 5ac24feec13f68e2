//! Sensitive-field classification over discovered field names.
//!
//! The classifier is a seam: the built-in lexicon covers the common
//! PII/credential/financial/health vocabularies, and callers may plug
//! their own curated classifier in its place.

use serde::{Deserialize, Serialize};

/// Sensitivity category of a flagged field. An unclassified field has
/// no category; the classifier returns `None` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityType {
    Pii,
    Credentials,
    Financial,
    Health,
}

impl SensitivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitivityType::Pii => "pii",
            SensitivityType::Credentials => "credentials",
            SensitivityType::Financial => "financial",
            SensitivityType::Health => "health",
        }
    }
}

/// A field flagged by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveField {
    pub field: String,
    /// Table the field was seen on, when known.
    pub table: Option<String>,
    pub sensitivity: SensitivityType,
    pub confidence: f32,
    /// The lexicon keyword that fired.
    pub matched_pattern: String,
}

/// A classifier verdict before it is attached to a table.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitiveMatch {
    pub sensitivity: SensitivityType,
    pub confidence: f32,
    pub matched_pattern: String,
}

/// Pluggable classification seam.
pub trait SensitivityClassifier: Send + Sync {
    /// Classify a field name; `None` means not sensitive.
    fn classify(&self, field: &str) -> Option<SensitiveMatch>;
}

/// Keyword entries: pattern, category, base confidence.
const LEXICON: &[(&str, SensitivityType, f32)] = &[
    ("ssn", SensitivityType::Pii, 0.95),
    ("social_security", SensitivityType::Pii, 0.95),
    ("passport", SensitivityType::Pii, 0.9),
    ("drivers_license", SensitivityType::Pii, 0.9),
    ("date_of_birth", SensitivityType::Pii, 0.85),
    ("birthdate", SensitivityType::Pii, 0.85),
    ("dob", SensitivityType::Pii, 0.7),
    ("email", SensitivityType::Pii, 0.8),
    ("phone", SensitivityType::Pii, 0.75),
    ("address", SensitivityType::Pii, 0.6),
    ("first_name", SensitivityType::Pii, 0.6),
    ("last_name", SensitivityType::Pii, 0.6),
    ("full_name", SensitivityType::Pii, 0.6),
    ("password", SensitivityType::Credentials, 0.95),
    ("passwd", SensitivityType::Credentials, 0.95),
    ("secret", SensitivityType::Credentials, 0.85),
    ("api_key", SensitivityType::Credentials, 0.95),
    ("apikey", SensitivityType::Credentials, 0.95),
    ("token", SensitivityType::Credentials, 0.75),
    ("private_key", SensitivityType::Credentials, 0.95),
    ("credential", SensitivityType::Credentials, 0.85),
    ("salt", SensitivityType::Credentials, 0.6),
    ("credit_card", SensitivityType::Financial, 0.95),
    ("card_number", SensitivityType::Financial, 0.95),
    ("cvv", SensitivityType::Financial, 0.95),
    ("iban", SensitivityType::Financial, 0.9),
    ("account_number", SensitivityType::Financial, 0.85),
    ("routing_number", SensitivityType::Financial, 0.9),
    ("salary", SensitivityType::Financial, 0.8),
    ("balance", SensitivityType::Financial, 0.6),
    ("tax_id", SensitivityType::Financial, 0.85),
    ("diagnosis", SensitivityType::Health, 0.9),
    ("medical", SensitivityType::Health, 0.85),
    ("prescription", SensitivityType::Health, 0.9),
    ("blood_type", SensitivityType::Health, 0.85),
    ("allergy", SensitivityType::Health, 0.8),
    ("insurance", SensitivityType::Health, 0.6),
];

/// Suffixes that mark a keyword hit as structural rather than sensitive
/// (`email_verified`, `token_count`).
const FALSE_POSITIVE_SUFFIXES: &[&str] = &[
    "_verified",
    "_confirmed",
    "_enabled",
    "_required",
    "_count",
    "_at",
    "_id",
    "_format",
    "_type",
    "_hash_algorithm",
];

const CONFIDENCE_FLOOR: f32 = 0.30;

/// Built-in keyword classifier.
#[derive(Debug, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl SensitivityClassifier for LexiconClassifier {
    fn classify(&self, field: &str) -> Option<SensitiveMatch> {
        let normalized = normalize_field(field);

        let mut best: Option<SensitiveMatch> = None;
        for (pattern, sensitivity, base_confidence) in LEXICON {
            if !normalized.contains(pattern) {
                continue;
            }
            let mut confidence = *base_confidence;
            if FALSE_POSITIVE_SUFFIXES
                .iter()
                .any(|suffix| normalized.ends_with(suffix))
            {
                confidence *= 0.5;
            }
            // Exact match is stronger evidence than a substring hit.
            if normalized != *pattern {
                confidence *= 0.9;
            }
            if confidence < CONFIDENCE_FLOOR {
                continue;
            }
            let better = best
                .as_ref()
                .map(|b| confidence > b.confidence)
                .unwrap_or(true);
            if better {
                best = Some(SensitiveMatch {
                    sensitivity: *sensitivity,
                    confidence,
                    matched_pattern: (*pattern).to_string(),
                });
            }
        }
        best
    }
}

/// Lowercase and convert camelCase to snake_case so `dateOfBirth` and
/// `date_of_birth` hit the same entries.
fn normalize_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, ch) in field.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == ' ' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_core_vocab() {
        let classifier = LexiconClassifier::new();
        let hit = classifier.classify("ssn").unwrap();
        assert_eq!(hit.sensitivity, SensitivityType::Pii);
        assert!(hit.confidence > 0.9);

        let hit = classifier.classify("apiKey").unwrap();
        assert_eq!(hit.sensitivity, SensitivityType::Credentials);
    }

    #[test]
    fn suffix_filters_downgrade_structural_fields() {
        let classifier = LexiconClassifier::new();
        let plain = classifier.classify("email").unwrap();
        let verified = classifier.classify("email_verified").unwrap();
        assert!(verified.confidence < plain.confidence);
    }

    #[test]
    fn unrelated_fields_pass() {
        let classifier = LexiconClassifier::new();
        assert!(classifier.classify("created_at").is_none());
        assert!(classifier.classify("title").is_none());
    }
}
