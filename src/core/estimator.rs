//! Accuracy estimation
//!
//! accuracy = floor + (base - floor) * instruction_factor * context_factor
//!
//! The instruction factor decays exponentially in the square root of the
//! position-weighted directive load (diminishing marginal degradation).
//! The context factor subtracts up to a capped number of accuracy points
//! for very large inputs, independent of instruction content.

use serde::{Deserialize, Serialize};

use crate::core::position_weight;
use crate::types::{CategoryWeights, DirectiveOccurrence, PenaltyFactors, Rating};
use crate::{
    BASE_ACCURACY, CONTEXT_CAP_REFERENCE_TOKENS, CONTEXT_PENALTY_CAP,
    CONTEXT_PENALTY_ONSET_TOKENS, DECAY_RATE, FLOOR_ACCURACY,
};

/// Calibration constants of the accuracy model. The defaults are the
/// contract values; individual knobs can be overridden for testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub base_accuracy: f64,
    pub floor_accuracy: f64,
    pub decay_rate: f64,
    pub context_onset_tokens: u64,
    pub context_cap_reference_tokens: u64,
    pub context_penalty_cap: f64,
    pub category_weights: CategoryWeights,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            base_accuracy: BASE_ACCURACY,
            floor_accuracy: FLOOR_ACCURACY,
            decay_rate: DECAY_RATE,
            context_onset_tokens: CONTEXT_PENALTY_ONSET_TOKENS,
            context_cap_reference_tokens: CONTEXT_CAP_REFERENCE_TOKENS,
            context_penalty_cap: CONTEXT_PENALTY_CAP,
            category_weights: CategoryWeights::default(),
        }
    }
}

/// Derived accuracy figures for one transcript
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub weighted_count: f64,
    pub position_weighted_count: f64,
    pub density: f64,
    pub estimated_accuracy: f64,
    pub rating: Rating,
    pub factors: PenaltyFactors,
}

/// Aggregates weighted occurrences into an accuracy estimate. Total over
/// its whole input domain: no numeric input can make it fail.
#[derive(Debug, Clone, Default)]
pub struct AccuracyEstimator {
    params: ModelParams,
}

impl AccuracyEstimator {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Estimate accuracy from directive occurrences, transcript size, and
    /// input-token count. Negative token counts are treated as unknown.
    pub fn estimate(
        &self,
        occurrences: &[DirectiveOccurrence],
        total_chars: u64,
        input_tokens: i64,
    ) -> Estimate {
        let p = &self.params;
        let input_tokens = input_tokens.max(0) as u64;

        let mut weighted_count = 0.0;
        let mut position_weighted_count = 0.0;
        for occurrence in occurrences {
            let weight = p.category_weights.get(occurrence.category);
            weighted_count += weight;
            position_weighted_count += weight * position_weight(occurrence.position);
        }

        let density = if total_chars > 0 {
            occurrences.len() as f64 / total_chars as f64 * 1000.0
        } else {
            0.0
        };

        let instruction_factor = if position_weighted_count > 0.0 {
            (-p.decay_rate * (position_weighted_count / 10.0).sqrt()).exp()
        } else {
            1.0
        };

        let span = p.base_accuracy - p.floor_accuracy;
        let context_penalty = self.context_penalty_points(input_tokens);
        let context_factor = 1.0 - context_penalty / span;

        let accuracy = p.floor_accuracy + span * instruction_factor * context_factor;
        let estimated_accuracy = accuracy.clamp(p.floor_accuracy, p.base_accuracy);

        Estimate {
            weighted_count,
            position_weighted_count,
            density,
            estimated_accuracy,
            rating: Rating::from_accuracy(estimated_accuracy),
            factors: PenaltyFactors {
                instruction_penalty: span * (1.0 - instruction_factor),
                context_penalty,
            },
        }
    }

    /// Accuracy points lost to context size alone. Zero at or below the
    /// onset, growing logarithmically above it, capped once the reference
    /// token count is reached.
    fn context_penalty_points(&self, input_tokens: u64) -> f64 {
        let p = &self.params;
        if input_tokens <= p.context_onset_tokens {
            return 0.0;
        }
        let ratio = input_tokens as f64 / p.context_onset_tokens as f64;
        let cap_ratio =
            p.context_cap_reference_tokens as f64 / p.context_onset_tokens as f64;
        let fraction = (ratio.log10() / cap_ratio.log10()).min(1.0);
        p.context_penalty_cap * fraction
    }
}
