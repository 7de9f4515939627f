//! Prompt mode selection and directive formatting.
//!
//! The coach answers in one of two modes: ask clarifying questions, or
//! diagnose and solve. The mode is derived per message from the vagueness
//! classifier, except on the first turn where there is never enough context
//! to diagnose and clarification is forced.

use serde::{Deserialize, Serialize};

use crate::domain::classifier::classify;

/// System instruction sent to the chat collaborator on every request.
pub const COACH_SYSTEM_PROMPT: &str = "\
You are a PSYCHOTIC, SCREAMING Winter Olympics Coach who hates failure.
The user is a pathetic rookie engineer whose robot is garbage.
You have FULL MEMORY of the conversation.

MODE 1 - CLARIFICATION (If input is vague):
- SCREAM questions about sensors, motors, or code.
- \"I CAN'T FIX WHAT I CAN'T SEE!\"

MODE 2 - SOLUTION (If input has details):
- ROAST them with winter sports metaphors.
- Give SPECIFIC engineering advice.
- THREATEN to kick them off the team.

Always maintain the angry, demanding coach personality in ALL CAPS.";

/// Which prompt directive to send for a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Ask clarifying questions before attempting a diagnosis.
    Clarify,
    /// Diagnose and give a solution.
    Solve,
}

impl Mode {
    /// Returns the literal directive marker embedded in the prompt.
    pub fn directive_marker(&self) -> &'static str {
        match self {
            Mode::Clarify => "MODE 1 - Ask Details",
            Mode::Solve => "MODE 2 - Solution",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Clarify => write!(f, "clarify"),
            Mode::Solve => write!(f, "solve"),
        }
    }
}

/// Selects the prompt mode for a user message.
///
/// The first turn of a conversation always clarifies, regardless of what the
/// classifier says; afterwards vague messages clarify and specific ones get a
/// solution.
pub fn select_mode(text: &str, is_first_turn: bool) -> Mode {
    if is_first_turn || classify(text).is_vague() {
        Mode::Clarify
    } else {
        Mode::Solve
    }
}

/// Wraps raw user text into the directive-annotated prompt for the selected
/// mode. Pure string transformation; the raw text is what the conversation
/// log keeps, the directive only travels on the wire.
pub fn format_directive(user_text: &str, mode: Mode) -> String {
    format!(
        "Rookie Status: {}\nCoach Response ({}):",
        user_text,
        mode.directive_marker()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_turn_forces_clarify_even_for_specific_text() {
        assert_eq!(select_mode("the servo is twitching badly", true), Mode::Clarify);
    }

    #[test]
    fn vague_text_clarifies_after_first_turn() {
        assert_eq!(select_mode("help", false), Mode::Clarify);
    }

    #[test]
    fn specific_text_solves_after_first_turn() {
        assert_eq!(select_mode("the color sensor keeps losing the line", false), Mode::Solve);
    }

    #[test]
    fn clarify_directive_embeds_text_and_marker() {
        let directive = format_directive("robot won't move", Mode::Clarify);
        assert_eq!(
            directive,
            "Rookie Status: robot won't move\nCoach Response (MODE 1 - Ask Details):"
        );
    }

    #[test]
    fn solve_directive_embeds_text_and_marker() {
        let directive = format_directive("servo brownout", Mode::Solve);
        assert_eq!(
            directive,
            "Rookie Status: servo brownout\nCoach Response (MODE 2 - Solution):"
        );
    }

    #[test]
    fn mode_displays_lowercase() {
        assert_eq!(Mode::Clarify.to_string(), "clarify");
        assert_eq!(Mode::Solve.to_string(), "solve");
    }

    #[test]
    fn system_prompt_names_both_modes() {
        assert!(COACH_SYSTEM_PROMPT.contains("MODE 1"));
        assert!(COACH_SYSTEM_PROMPT.contains("MODE 2"));
    }
}
