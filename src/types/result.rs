//! The assembled analysis report

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::types::{Breakdown, TranscriptStats};
use crate::BASE_ACCURACY;

/// Qualitative accuracy band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Excellent,
    Good,
    Moderate,
    Degraded,
    Poor,
}

impl Rating {
    /// Band an accuracy percentage. Lower bounds are inclusive;
    /// `poor` has no lower bound.
    pub fn from_accuracy(accuracy: f64) -> Rating {
        if accuracy >= 95.0 {
            Rating::Excellent
        } else if accuracy >= 85.0 {
            Rating::Good
        } else if accuracy >= 75.0 {
            Rating::Moderate
        } else if accuracy >= 65.0 {
            Rating::Degraded
        } else {
            Rating::Poor
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Moderate => "moderate",
            Rating::Degraded => "degraded",
            Rating::Poor => "poor",
        };
        write!(f, "{}", name)
    }
}

/// Penalty breakdown, in accuracy points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyFactors {
    pub instruction_penalty: f64,
    pub context_penalty: f64,
}

/// Full analysis of one transcript. Immutable after construction; raw
/// values are kept at full precision, rounding happens only in `rounded`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub instruction_count: u64,
    pub weighted_count: f64,
    pub position_weighted_count: f64,
    pub density: f64,
    pub estimated_accuracy: f64,
    pub rating: Rating,
    pub breakdown: Breakdown,
    pub factors: PenaltyFactors,
    pub stats: TranscriptStats,
    #[serde(skip, default = "Utc::now")]
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// The defined default for absent, unreadable, or empty input:
    /// zero load at base accuracy, with whatever stats extraction produced.
    pub fn degenerate(stats: TranscriptStats) -> Self {
        Self {
            instruction_count: 0,
            weighted_count: 0.0,
            position_weighted_count: 0.0,
            density: 0.0,
            estimated_accuracy: BASE_ACCURACY,
            rating: Rating::Excellent,
            breakdown: Breakdown::new(),
            factors: PenaltyFactors::default(),
            stats,
            analyzed_at: Utc::now(),
        }
    }

    /// Copy with display rounding applied (one decimal, density two).
    /// Presentation concern only; callers keep the full-precision original.
    pub fn rounded(&self) -> Self {
        Self {
            weighted_count: round_to(self.weighted_count, 1),
            position_weighted_count: round_to(self.position_weighted_count, 1),
            density: round_to(self.density, 2),
            estimated_accuracy: round_to(self.estimated_accuracy, 1),
            factors: PenaltyFactors {
                instruction_penalty: round_to(self.factors.instruction_penalty, 1),
                context_penalty: round_to(self.factors.context_penalty, 1),
            },
            ..self.clone()
        }
    }

    /// Format for status-line display (with colors)
    pub fn to_status_line(&self, compact: bool) -> String {
        let line = if compact {
            format!(
                "Inst:{} Acc:{:.0}%",
                self.instruction_count, self.estimated_accuracy
            )
        } else {
            format!(
                "Instructions: {} | Estimated Accuracy: {:.1}% ({})",
                self.instruction_count, self.estimated_accuracy, self.rating
            )
        };
        self.paint(&line).to_string()
    }

    /// Color by accuracy band: green above 90, yellow above 75, red below
    pub fn paint(&self, text: &str) -> ColoredString {
        if self.estimated_accuracy >= 90.0 {
            text.green()
        } else if self.estimated_accuracy >= 75.0 {
            text.yellow()
        } else {
            text.red()
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
