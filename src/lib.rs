//! Promptload: estimates how much an LLM's instruction-following accuracy
//! may degrade under the directive load of a conversation transcript.
//!
//! Pipeline: transcript -> segment extraction -> directive counting ->
//! position weighting -> accuracy estimation -> assembled report.
//!
//! This is a pattern-counting heuristic, not an NLP classifier: it counts
//! weighted lexical triggers and combines them with positional and
//! context-size penalties into a single accuracy score.

pub mod core;
pub mod types;

// =============================================================================
// CATEGORY WEIGHTS
// =============================================================================

/// must / should / shall / need to / ...
pub const WEIGHT_MODAL_OBLIGATION: f64 = 1.0;

/// Prohibitions are harder to follow
pub const WEIGHT_PROHIBITION: f64 = 1.2;

/// always / every / all / only / ...
pub const WEIGHT_ABSOLUTE: f64 = 0.8;

/// Sentence-initial verbs; common, lower cognitive load
pub const WEIGHT_IMPERATIVE: f64 = 0.6;

/// Emphasized instructions add pressure
pub const WEIGHT_EMPHASIS: f64 = 1.5;

// =============================================================================
// POSITION WEIGHT CURVE (U-shaped, "lost in the middle")
// =============================================================================

/// Weight at the midpoint of the transcript
pub const POSITION_WEIGHT_FLOOR: f64 = 0.6;

/// Extra weight gained toward the edges (floor + range = 1.0 at the ends)
pub const POSITION_WEIGHT_RANGE: f64 = 0.4;

// =============================================================================
// ACCURACY MODEL
// =============================================================================

/// Accuracy reported for an empty transcript
pub const BASE_ACCURACY: f64 = 98.0;

/// Accuracy never drops below this, regardless of load
pub const FLOOR_ACCURACY: f64 = 60.0;

/// Exponential decay coefficient for instruction load
pub const DECAY_RATE: f64 = 0.15;

/// Context-size penalty starts above this many input tokens
pub const CONTEXT_PENALTY_ONSET_TOKENS: u64 = 50_000;

/// Token count at which the context penalty reaches its cap
pub const CONTEXT_CAP_REFERENCE_TOKENS: u64 = 200_000;

/// Maximum accuracy-point loss from context size alone
pub const CONTEXT_PENALTY_CAP: f64 = 5.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.1.0";
