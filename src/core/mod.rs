//! Core analysis pipeline: extraction, counting, weighting, estimation

mod analyzer;
mod counter;
mod estimator;
mod extractor;
mod position;

pub use analyzer::Analyzer;
pub use counter::{DirectiveCounter, ScanOutcome};
pub use estimator::{AccuracyEstimator, Estimate, ModelParams};
pub use extractor::{extract_from_path, extract_segments, ExtractOutcome};
pub use position::position_weight;
