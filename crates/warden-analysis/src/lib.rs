//! Warden analysis engine.
//!
//! Discovers database/data-store access across a polyglot codebase and
//! polices it against declarative boundary rules. The pipeline runs
//! strictly left to right:
//!
//! raw AST → normalizer → [`UnifiedCallChain`] → matcher registry (+ scorer)
//! → [`DataAccessPoint`] → aggregator → [`DataAccessMap`] → rule evaluator
//! → [`BoundaryViolation`]s.
//!
//! [`UnifiedCallChain`]: normalize::UnifiedCallChain
//! [`DataAccessPoint`]: aggregate::DataAccessPoint
//! [`DataAccessMap`]: aggregate::DataAccessMap
//! [`BoundaryViolation`]: boundaries::BoundaryViolation

pub mod aggregate;
pub mod boundaries;
pub mod confidence;
pub mod matchers;
pub mod normalize;
pub mod pipeline;
pub mod scanner;
pub mod sensitive;

pub(crate) use warden_core::types;

pub use aggregate::{DataAccessMap, DataAccessPoint};
pub use boundaries::{BoundaryRules, BoundaryViolation};
pub use matchers::{AccessOperation, MatcherRegistry, PatternMatcher};
pub use normalize::{ChainNormalizer, NormalizerRegistry, UnifiedCallChain};
pub use pipeline::{BoundaryAnalyzer, BoundaryScanResult, SourceFile};
pub use scanner::Language;
