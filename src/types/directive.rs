//! Directive categories, occurrences, and category weights

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    WEIGHT_ABSOLUTE, WEIGHT_EMPHASIS, WEIGHT_IMPERATIVE, WEIGHT_MODAL_OBLIGATION,
    WEIGHT_PROHIBITION,
};

/// The five directive pattern categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveCategory {
    ModalObligation,
    Prohibition,
    Absolute,
    Imperative,
    Emphasis,
}

impl DirectiveCategory {
    pub const ALL: [DirectiveCategory; 5] = [
        DirectiveCategory::ModalObligation,
        DirectiveCategory::Prohibition,
        DirectiveCategory::Absolute,
        DirectiveCategory::Imperative,
        DirectiveCategory::Emphasis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DirectiveCategory::ModalObligation => "modal_obligation",
            DirectiveCategory::Prohibition => "prohibition",
            DirectiveCategory::Absolute => "absolute",
            DirectiveCategory::Imperative => "imperative",
            DirectiveCategory::Emphasis => "emphasis",
        }
    }
}

impl std::fmt::Display for DirectiveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single directive match, tagged with the position of the segment
/// it occurred in. Ephemeral: exists only between counting and estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectiveOccurrence {
    pub category: DirectiveCategory,
    pub position: f64,
}

/// Per-category raw counts, keyed in stable category order
pub type Breakdown = BTreeMap<DirectiveCategory, u64>;

/// Per-category multipliers. Calibration constants of the accuracy model;
/// never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub modal_obligation: f64,
    pub prohibition: f64,
    pub absolute: f64,
    pub imperative: f64,
    pub emphasis: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            modal_obligation: WEIGHT_MODAL_OBLIGATION,
            prohibition: WEIGHT_PROHIBITION,
            absolute: WEIGHT_ABSOLUTE,
            imperative: WEIGHT_IMPERATIVE,
            emphasis: WEIGHT_EMPHASIS,
        }
    }
}

impl CategoryWeights {
    pub fn get(&self, category: DirectiveCategory) -> f64 {
        match category {
            DirectiveCategory::ModalObligation => self.modal_obligation,
            DirectiveCategory::Prohibition => self.prohibition,
            DirectiveCategory::Absolute => self.absolute,
            DirectiveCategory::Imperative => self.imperative,
            DirectiveCategory::Emphasis => self.emphasis,
        }
    }
}
