//! Core types for promptload

mod directive;
mod result;
mod segment;

pub use directive::{Breakdown, CategoryWeights, DirectiveCategory, DirectiveOccurrence};
pub use result::{AnalysisResult, PenaltyFactors, Rating};
pub use segment::{Role, Segment, TranscriptStats};
