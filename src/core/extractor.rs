//! Segment extraction from JSONL transcripts
//!
//! Each line is an independent JSON record, either flat {role, content}
//! or nested {message: {role, content}, type, ...}. Content is a plain
//! string or a list of structured blocks; only text blocks and the string
//! content of tool-result blocks contribute transcript text.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::types::{Role, Segment, TranscriptStats};

/// Extraction output: ordered segments plus aggregate statistics
#[derive(Debug, Clone, Default)]
pub struct ExtractOutcome {
    pub segments: Vec<Segment>,
    pub stats: TranscriptStats,
}

/// Parse a JSONL transcript file. A missing or unreadable file yields an
/// empty outcome, never an error.
pub fn extract_from_path(path: &Path) -> ExtractOutcome {
    match fs::read_to_string(path) {
        Ok(raw) => extract_segments(&raw),
        Err(_) => ExtractOutcome::default(),
    }
}

/// Parse newline-delimited JSON records into ordered segments. Unparseable
/// lines and records with unexpected shapes are skipped, not fatal.
pub fn extract_segments(raw: &str) -> ExtractOutcome {
    let mut outcome = ExtractOutcome::default();
    let lines: Vec<&str> = raw.lines().collect();
    let total_lines = lines.len();

    for (line_idx, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let entry: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_) => continue,
        };
        let Value::Object(entry) = entry else {
            continue;
        };
        outcome.stats.total_messages += 1;

        // 0.0 = first line, 1.0 = last; a single-record transcript has no
        // edges to speak of, so it sits at the midpoint
        let position = if total_lines > 1 {
            line_idx as f64 / (total_lines - 1) as f64
        } else {
            0.5
        };

        // Nested records wrap the message object; flat records are the message
        let msg = match entry.get("message") {
            Some(Value::Object(inner)) => inner,
            Some(_) => continue,
            None => &entry,
        };
        let role = msg
            .get("role")
            .and_then(Value::as_str)
            .and_then(Role::parse);
        let content = msg.get("content");

        match role {
            Some(Role::System) => {
                outcome.stats.system_messages += 1;
                collect_text_blocks(content, Role::System, position, &mut outcome);
            }
            Some(Role::User) => {
                outcome.stats.user_messages += 1;
                collect_user_content(content, position, &mut outcome);
            }
            Some(Role::Assistant) => {
                // Assistant output is not counted as instruction load
                outcome.stats.assistant_messages += 1;
            }
            Some(Role::Tool) | None => {}
        }
    }

    outcome
}

/// String content, or text blocks out of a block list
fn collect_text_blocks(
    content: Option<&Value>,
    role: Role,
    position: f64,
    outcome: &mut ExtractOutcome,
) {
    match content {
        Some(Value::String(text)) => push_segment(text, role, position, outcome),
        Some(Value::Array(blocks)) => {
            for block in blocks {
                if let Some(text) = block.get("text").and_then(Value::as_str) {
                    push_segment(text, role, position, outcome);
                }
            }
        }
        _ => {}
    }
}

/// User content additionally carries tool-result blocks, which often
/// contain instructions of their own
fn collect_user_content(content: Option<&Value>, position: f64, outcome: &mut ExtractOutcome) {
    match content {
        Some(Value::String(text)) => push_segment(text, Role::User, position, outcome),
        Some(Value::Array(blocks)) => {
            for block in blocks {
                if let Some(text) = block.get("text").and_then(Value::as_str) {
                    push_segment(text, Role::User, position, outcome);
                }
                if block.get("type").and_then(Value::as_str) == Some("tool_result") {
                    outcome.stats.tool_results += 1;
                    if let Some(text) = block.get("content").and_then(Value::as_str) {
                        push_segment(text, Role::Tool, position, outcome);
                    }
                }
            }
        }
        _ => {}
    }
}

fn push_segment(text: &str, role: Role, position: f64, outcome: &mut ExtractOutcome) {
    if text.is_empty() {
        return;
    }
    outcome.stats.total_chars += text.chars().count() as u64;
    outcome.segments.push(Segment::new(text, role, position));
}
