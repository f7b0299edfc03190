//! Pipeline orchestration and report assembly
//!
//! Wires extraction, counting, and estimation together and packages the
//! result. The analyzer always returns a well-formed result: absent or
//! unreadable input degrades to the base-accuracy default.

use std::path::Path;

use chrono::Utc;

use crate::core::{extract_from_path, extract_segments, AccuracyEstimator, DirectiveCounter, ExtractOutcome};
use crate::types::AnalysisResult;

/// Runs the full analysis pipeline. Each invocation is independent;
/// the analyzer holds no mutable state.
#[derive(Debug, Default)]
pub struct Analyzer {
    counter: DirectiveCounter,
    estimator: AccuracyEstimator,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with a non-default accuracy model
    pub fn with_estimator(estimator: AccuracyEstimator) -> Self {
        Self {
            counter: DirectiveCounter::new(),
            estimator,
        }
    }

    /// Analyze a transcript file. A missing or unreadable file yields the
    /// degenerate base-accuracy result, not an error.
    pub fn analyze_path(&self, path: &Path, input_tokens: i64) -> AnalysisResult {
        self.assemble(extract_from_path(path), input_tokens)
    }

    /// Analyze raw newline-delimited JSON
    pub fn analyze_raw(&self, raw: &str, input_tokens: i64) -> AnalysisResult {
        self.assemble(extract_segments(raw), input_tokens)
    }

    fn assemble(&self, extraction: ExtractOutcome, input_tokens: i64) -> AnalysisResult {
        let ExtractOutcome { segments, stats } = extraction;
        if segments.is_empty() {
            return AnalysisResult::degenerate(stats);
        }

        let scan = self.counter.scan(&segments);
        let estimate = self
            .estimator
            .estimate(&scan.occurrences, stats.total_chars, input_tokens);

        AnalysisResult {
            instruction_count: scan.occurrences.len() as u64,
            weighted_count: estimate.weighted_count,
            position_weighted_count: estimate.position_weighted_count,
            density: estimate.density,
            estimated_accuracy: estimate.estimated_accuracy,
            rating: estimate.rating,
            breakdown: scan.breakdown,
            factors: estimate.factors,
            stats,
            analyzed_at: Utc::now(),
        }
    }
}
