//! The scan pipeline: parallel per-file discovery, a strict aggregation
//! barrier, then single-threaded rule evaluation.
//!
//! Per-file work is a pure function of that file's source, so the rayon
//! phase shares no mutable state. Per-file failures are recorded and
//! surfaced as counters; only cancellation and invalid configuration
//! abort the scan.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use warden_core::cancellation::ScanCancellation;
use warden_core::config::{ConfidenceWeights, ScanConfig};
use warden_core::errors::{PipelineError, ScanError};

use crate::aggregate::{self, DataAccessMap, DataAccessPoint, ScanStats};
use crate::boundaries::{self, BoundaryRules, BoundaryViolation};
use crate::confidence::ConfidenceScorer;
use crate::matchers::MatcherRegistry;
use crate::normalize::{NormalizerRegistry, UnifiedCallChain};
use crate::scanner::{parse_source, Language};
use crate::sensitive::{LexiconClassifier, SensitivityClassifier};

/// Source text already materialized by the caller; the pipeline performs
/// no I/O.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub source: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// A file the scan had to skip, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub file: String,
    pub reason: String,
}

/// Everything one scan produced.
#[derive(Debug, Clone)]
pub struct BoundaryScanResult {
    pub map: DataAccessMap,
    pub violations: Vec<BoundaryViolation>,
    pub failures: Vec<FileFailure>,
    pub stats: ScanStats,
}

const CONTEXT_SNIPPET_MAX: usize = 160;

/// The analyzer owns the registries, the scorer, and the classifier
/// seam; one instance serves many scans.
pub struct BoundaryAnalyzer {
    config: ScanConfig,
    scorer: ConfidenceScorer,
    normalizers: NormalizerRegistry,
    matchers: MatcherRegistry,
    classifier: Box<dyn SensitivityClassifier>,
    cancellation: ScanCancellation,
}

impl BoundaryAnalyzer {
    /// Build with validated configuration and weights. Invalid weights
    /// are rejected here, at startup, never at evaluation time.
    pub fn new(config: ScanConfig, weights: ConfidenceWeights) -> Result<Self, PipelineError> {
        config.validate()?;
        let scorer = ConfidenceScorer::new(weights)?;
        Ok(Self {
            config,
            scorer,
            normalizers: NormalizerRegistry::with_builtins(),
            matchers: MatcherRegistry::with_builtins(),
            classifier: Box::new(LexiconClassifier::new()),
            cancellation: ScanCancellation::new(),
        })
    }

    pub fn with_defaults() -> Self {
        Self::new(ScanConfig::default(), ConfidenceWeights::default())
            .expect("default configuration is valid")
    }

    /// Swap in a curated sensitivity classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn SensitivityClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Handle for cancelling an in-flight scan from another thread.
    /// Reusing the analyzer after a cancelled scan requires `reset()`.
    pub fn cancellation(&self) -> &ScanCancellation {
        &self.cancellation
    }

    /// Scan the given files and, when a policy is supplied, evaluate it.
    pub fn scan(
        &self,
        files: &[SourceFile],
        rules: Option<&BoundaryRules>,
    ) -> Result<BoundaryScanResult, PipelineError> {
        let started = Instant::now();
        info!(files = files.len(), "starting boundary scan");

        let per_file = self.run_discovery(files);

        let mut points: Vec<DataAccessPoint> = Vec::new();
        let mut failures: Vec<FileFailure> = Vec::new();
        for outcome in per_file {
            match outcome {
                Ok(mut file_points) => points.append(&mut file_points),
                Err(failure) => {
                    warn!(file = %failure.file, reason = %failure.reason, "file excluded from scan");
                    failures.push(failure);
                }
            }
        }

        if self.cancellation.is_cancelled() {
            return Err(ScanError::Cancelled.into());
        }

        // Aggregation barrier: the map is computed over the complete
        // point set, never incrementally.
        let mut map = aggregate::build_access_map(points, self.classifier.as_ref());

        let violations = match rules {
            Some(rules) => boundaries::evaluate(&map, rules),
            None => Vec::new(),
        };

        map.stats.files_scanned = (files.len() - failures.len()) as u32;
        map.stats.files_failed = failures.len() as u32;
        map.stats.violations_found = violations.len() as u32;
        map.stats.scan_duration_ms = started.elapsed().as_millis() as u64;
        let stats = map.stats;

        info!(
            access_points = stats.access_points_found,
            tables = stats.tables_found,
            violations = stats.violations_found,
            duration_ms = stats.scan_duration_ms,
            "boundary scan complete"
        );

        Ok(BoundaryScanResult {
            map,
            violations,
            failures,
            stats,
        })
    }

    fn run_discovery(&self, files: &[SourceFile]) -> Vec<Result<Vec<DataAccessPoint>, FileFailure>> {
        let work = || {
            files
                .par_iter()
                .map(|file| self.process_file(file))
                .collect::<Vec<_>>()
        };

        match self.config.threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(work),
                Err(e) => {
                    warn!(error = %e, "worker pool unavailable, using global pool");
                    work()
                }
            },
            None => work(),
        }
    }

    /// Discovery for one file: detect, parse, normalize, match, score.
    fn process_file(&self, file: &SourceFile) -> Result<Vec<DataAccessPoint>, FileFailure> {
        if self.cancellation.is_cancelled() {
            return Ok(Vec::new());
        }

        let language = Language::from_path(&file.path).ok_or_else(|| FileFailure {
            file: file.path.clone(),
            reason: "unsupported language".to_string(),
        })?;
        let normalizer = self.normalizers.get(language).ok_or_else(|| FileFailure {
            file: file.path.clone(),
            reason: format!("no normalizer registered for {language}"),
        })?;

        let tree = parse_source(language, &file.source, &file.path).map_err(|e| FileFailure {
            file: file.path.clone(),
            reason: e.to_string(),
        })?;

        let max_depth = self.config.effective_max_chain_depth();
        let chains = normalizer.normalize_file(&tree, &file.source, &file.path, max_depth);
        debug!(file = %file.path, chains = chains.len(), "normalized");

        let mut points = Vec::new();
        for chain in &chains {
            self.resolve_chain(chain, &mut points);
            for nested in chain.nested_chains() {
                self.resolve_chain(nested, &mut points);
            }
        }
        Ok(points)
    }

    fn resolve_chain(&self, chain: &UnifiedCallChain, points: &mut Vec<DataAccessPoint>) {
        let Some(result) = self.matchers.resolve(chain) else {
            return;
        };
        let (confidence, breakdown) = self.scorer.score(&result, chain);
        points.push(DataAccessPoint {
            // Assigned during aggregation, after the global sort.
            id: String::new(),
            table: result.table,
            fields: result.fields,
            operation: result.operation,
            file: chain.span.file.clone(),
            line: chain.span.start_line,
            column: chain.span.start_column,
            context: snippet(&chain.full_expression),
            is_raw_sql: result.is_raw_sql,
            confidence,
            confidence_breakdown: breakdown,
            framework: result.orm,
            language: chain.language,
            model: result.model,
        });
    }
}

/// First line of the expression, bounded, for human-readable context.
fn snippet(expression: &str) -> String {
    let first_line = expression.lines().next().unwrap_or("");
    if first_line.chars().count() <= CONTEXT_SNIPPET_MAX {
        return first_line.to_string();
    }
    first_line.chars().take(CONTEXT_SNIPPET_MAX).collect()
}
