//! Transcript segments and aggregate statistics

use serde::{Deserialize, Serialize};

/// Speaker role attached to a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    /// Parse a transcript role string. Unknown roles yield `None`.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            "tool" => Some(Role::Tool),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        };
        write!(f, "{}", name)
    }
}

/// One contiguous piece of transcript text with its normalized position.
/// Position 0.0 is the first record of the conversation, 1.0 the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub role: Role,
    pub position: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, role: Role, position: f64) -> Self {
        Self {
            text: text.into(),
            role,
            position,
        }
    }
}

/// Aggregate counts over a whole transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptStats {
    pub total_messages: u64,
    pub system_messages: u64,
    pub user_messages: u64,
    pub assistant_messages: u64,
    pub tool_results: u64,
    pub total_chars: u64,
}
