//! Directive pattern counter
//!
//! Five categories of lexical triggers, matched case-insensitively on
//! word boundaries. Imperative verbs count only when they open a sentence
//! or line, which keeps mid-sentence uses ("you can check it") from
//! inflating the count.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{Breakdown, DirectiveCategory, DirectiveOccurrence, Segment};

/// One compiled lexical trigger
struct PatternSpec {
    regex: Regex,
    /// Matches whose tail starts with this are discarded ("all of the above")
    not_followed_by: Option<Regex>,
}

/// Word-boundary trigger, matched anywhere
fn word(trigger: &str) -> PatternSpec {
    PatternSpec {
        regex: Regex::new(&format!(r"(?i)\b{}\b", trigger)).unwrap(),
        not_followed_by: None,
    }
}

/// Word-boundary trigger with an exclusion suffix. The regex crate has no
/// lookahead, so the suffix is checked against the remaining text instead.
fn word_unless(trigger: &str, suffix: &str) -> PatternSpec {
    PatternSpec {
        regex: Regex::new(&format!(r"(?i)\b{}\b", trigger)).unwrap(),
        not_followed_by: Some(Regex::new(&format!(r"(?i)^{}", suffix)).unwrap()),
    }
}

/// Trigger that counts only at the start of a line or sentence
fn sentence_initial(trigger: &str) -> PatternSpec {
    PatternSpec {
        regex: Regex::new(&format!(r"(?im)(?:^|\.\s+){}\b", trigger)).unwrap(),
        not_followed_by: None,
    }
}

lazy_static! {
    static ref PATTERN_TABLE: Vec<(DirectiveCategory, Vec<PatternSpec>)> = vec![
        (
            DirectiveCategory::ModalObligation,
            vec![
                word("must"),
                word("should"),
                word("shall"),
                word("need to"),
                word("have to"),
                word("required to"),
                word("has to"),
            ],
        ),
        (
            DirectiveCategory::Prohibition,
            vec![
                word("never"),
                word("don'?t"),
                word("do not"),
                word("cannot"),
                word("can'?t"),
                word("must not"),
                word("mustn'?t"),
                word("shouldn'?t"),
                word("should not"),
                word("prohibited"),
                word("forbidden"),
                word("avoid"),
            ],
        ),
        (
            DirectiveCategory::Absolute,
            vec![
                word("always"),
                word("every"),
                word_unless("all", r"\s+of\s+the\s+above"),
                word("none"),
                word("only"),
                word("exactly"),
                word("precisely"),
            ],
        ),
        (
            DirectiveCategory::Imperative,
            vec![
                sentence_initial("ensure"),
                sentence_initial("make sure"),
                sentence_initial("use"),
                sentence_initial("do"),
                sentence_initial("check"),
                sentence_initial("verify"),
                sentence_initial("confirm"),
                sentence_initial("add"),
                sentence_initial("remove"),
                sentence_initial("create"),
                sentence_initial("delete"),
                sentence_initial("update"),
                sentence_initial("include"),
                sentence_initial("exclude"),
                sentence_initial("follow"),
                sentence_initial("apply"),
            ],
        ),
        (
            DirectiveCategory::Emphasis,
            vec![
                word("important"),
                word("critical"),
                word("essential"),
                word("crucial"),
                word("vital"),
                word("mandatory"),
                word("compulsory"),
            ],
        ),
    ];
}

/// Whole-transcript scan output: per-category counts and one occurrence
/// per match, in segment order
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub breakdown: Breakdown,
    pub occurrences: Vec<DirectiveOccurrence>,
}

/// Scans text for directive patterns
#[derive(Debug, Default)]
pub struct DirectiveCounter;

impl DirectiveCounter {
    pub fn new() -> Self {
        Self
    }

    /// Count directive matches in a single piece of text. All five
    /// categories are present in the result, zero or not.
    pub fn count_text(&self, text: &str) -> Breakdown {
        let mut counts = Breakdown::new();
        for (category, patterns) in PATTERN_TABLE.iter() {
            let hits: u64 = patterns.iter().map(|spec| count_matches(spec, text)).sum();
            counts.insert(*category, hits);
        }
        counts
    }

    /// Scan ordered segments, emitting one occurrence per match tagged with
    /// the owning segment's position. A token matching several categories
    /// counts once per matching category.
    pub fn scan(&self, segments: &[Segment]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        for category in DirectiveCategory::ALL {
            outcome.breakdown.insert(category, 0);
        }

        for segment in segments {
            for (category, patterns) in PATTERN_TABLE.iter() {
                let hits: u64 = patterns
                    .iter()
                    .map(|spec| count_matches(spec, &segment.text))
                    .sum();
                *outcome.breakdown.entry(*category).or_insert(0) += hits;
                for _ in 0..hits {
                    outcome.occurrences.push(DirectiveOccurrence {
                        category: *category,
                        position: segment.position,
                    });
                }
            }
        }

        outcome
    }
}

fn count_matches(spec: &PatternSpec, text: &str) -> u64 {
    spec.regex
        .find_iter(text)
        .filter(|m| match &spec.not_followed_by {
            Some(suffix) => !suffix.is_match(&text[m.end()..]),
            None => true,
        })
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn count(text: &str, category: DirectiveCategory) -> u64 {
        DirectiveCounter::new().count_text(text)[&category]
    }

    #[test]
    fn test_modal_obligations() {
        let text = "You must do this. You should also do that. You need to check.";
        assert_eq!(count(text, DirectiveCategory::ModalObligation), 3);
    }

    #[test]
    fn test_prohibitions() {
        let text = "Never do this. Don't do that. You cannot proceed. Avoid errors.";
        assert_eq!(count(text, DirectiveCategory::Prohibition), 4);
    }

    #[test]
    fn test_absolutes() {
        let text = "Always check. Every time. Use only this. Exactly right.";
        assert_eq!(count(text, DirectiveCategory::Absolute), 4);
    }

    #[test]
    fn test_all_of_the_above_is_excluded() {
        assert_eq!(count("Pick all of the above.", DirectiveCategory::Absolute), 0);
        assert_eq!(count("Validate all inputs.", DirectiveCategory::Absolute), 1);
    }

    #[test]
    fn test_emphasis() {
        let text = "This is important. It's critical. Essential for success. Mandatory step.";
        assert_eq!(count(text, DirectiveCategory::Emphasis), 4);
    }

    #[test]
    fn test_imperatives_only_sentence_initial() {
        // "Ensure" opens the text, "Check" opens a sentence
        let text = "Ensure the tests pass. Check the logs.";
        assert_eq!(count(text, DirectiveCategory::Imperative), 2);
        // same verbs mid-sentence do not count
        assert_eq!(
            count("You can check it whenever you use it", DirectiveCategory::Imperative),
            0
        );
        // line starts count too
        assert_eq!(count("check one\ncheck two", DirectiveCategory::Imperative), 2);
    }

    #[test]
    fn test_case_insensitive() {
        let counts = DirectiveCounter::new().count_text("MUST do this. Never DO that. ALWAYS check.");
        assert_eq!(counts[&DirectiveCategory::ModalObligation], 1);
        assert_eq!(counts[&DirectiveCategory::Prohibition], 1);
        assert_eq!(counts[&DirectiveCategory::Absolute], 1);
    }

    #[test]
    fn test_one_token_per_matching_category() {
        // must -> modal, never -> prohibition, critical -> emphasis
        let counts =
            DirectiveCounter::new().count_text("You must never ignore critical instructions.");
        assert_eq!(counts[&DirectiveCategory::ModalObligation], 1);
        assert_eq!(counts[&DirectiveCategory::Prohibition], 1);
        assert_eq!(counts[&DirectiveCategory::Emphasis], 1);
    }

    #[test]
    fn test_empty_text_counts_nothing() {
        let counts = DirectiveCounter::new().count_text("");
        assert_eq!(counts.values().sum::<u64>(), 0);
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn test_scan_tags_occurrences_with_segment_position() {
        let segments = vec![
            Segment::new("You must comply.", Role::System, 0.0),
            Segment::new("Never stop.", Role::User, 1.0),
        ];
        let outcome = DirectiveCounter::new().scan(&segments);
        assert_eq!(outcome.occurrences.len(), 2);
        assert_eq!(outcome.occurrences[0].category, DirectiveCategory::ModalObligation);
        assert_eq!(outcome.occurrences[0].position, 0.0);
        assert_eq!(outcome.occurrences[1].category, DirectiveCategory::Prohibition);
        assert_eq!(outcome.occurrences[1].position, 1.0);
    }

    #[test]
    fn test_scan_breakdown_matches_occurrence_total() {
        let segments = vec![Segment::new(
            "You must always verify everything. Never skip checks. This is critical.",
            Role::System,
            0.0,
        )];
        let outcome = DirectiveCounter::new().scan(&segments);
        let total: u64 = outcome.breakdown.values().sum();
        assert_eq!(total, outcome.occurrences.len() as u64);
    }

    #[test]
    fn test_raw_counts_independent_of_position() {
        let text = "You must do this.";
        let at_start = DirectiveCounter::new().scan(&[Segment::new(text, Role::System, 0.0)]);
        let at_middle = DirectiveCounter::new().scan(&[Segment::new(text, Role::User, 0.5)]);
        assert_eq!(at_start.breakdown, at_middle.breakdown);
    }
}
