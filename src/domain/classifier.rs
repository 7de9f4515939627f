//! Vagueness classifier.
//!
//! A cheap lexical heuristic that decides whether a user message carries
//! enough detail to diagnose, or is too vague and needs clarification first.
//! Total over all string inputs, deterministic, and side-effect free.

use serde::{Deserialize, Serialize};

/// Messages shorter than this (in whitespace tokens) with no specific term
/// are classified as vague.
pub const VAGUE_WORD_THRESHOLD: usize = 4;

/// Domain vocabulary that marks a message as specific regardless of length.
///
/// Matched as substrings of the lowercased input, so plurals and compounds
/// ("motors", "color-sensor") count too.
pub const SPECIFIC_TERMS: &[&str] = &[
    "sensor",
    "motor",
    "servo",
    "code",
    "pin",
    "voltage",
    "speed",
    "turn",
    "stop",
    "move",
    "track",
    "line",
    "color",
    "ultrasonic",
];

/// Result of classifying a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vagueness {
    /// Too short and unspecific to act on.
    Vague,
    /// Carries enough detail to attempt a diagnosis.
    Specific,
}

impl Vagueness {
    /// Returns true for `Vague`.
    pub fn is_vague(&self) -> bool {
        matches!(self, Self::Vague)
    }
}

/// Classifies user text as vague or specific.
///
/// Vague iff the message has fewer than [`VAGUE_WORD_THRESHOLD`] whitespace
/// tokens and contains none of the [`SPECIFIC_TERMS`]. Empty input is vague.
pub fn classify(text: &str) -> Vagueness {
    let lowered = text.to_lowercase();
    let word_count = lowered.split_whitespace().count();
    let has_specific_term = SPECIFIC_TERMS.iter().any(|term| lowered.contains(term));

    if word_count < VAGUE_WORD_THRESHOLD && !has_specific_term {
        Vagueness::Vague
    } else {
        Vagueness::Specific
    }
}
