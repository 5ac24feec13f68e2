//! Boundary policy: rule loading and evaluation.
//!
//! Load is all-or-nothing — one structurally invalid rule rejects the
//! whole document. Evaluation is a pure function from the access map
//! and the loaded rules to a sorted violation list.

pub mod evaluator;
pub mod rules;

pub use evaluator::{evaluate, BoundaryViolation};
pub use rules::{load_rules, BoundaryRule, BoundaryRules, SensitivityTiers, Severity};
