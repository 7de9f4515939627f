//! Domain layer - pure conversation logic.
//!
//! Everything in this layer is synchronous, deterministic, and free of I/O:
//! the turn log, the vagueness classifier, and the prompt mode selection.

mod classifier;
mod conversation;
mod errors;
mod prompt;
mod turn;

pub use classifier::{classify, Vagueness, SPECIFIC_TERMS, VAGUE_WORD_THRESHOLD};
pub use conversation::Conversation;
pub use errors::DomainError;
pub use prompt::{format_directive, select_mode, Mode, COACH_SYSTEM_PROMPT};
pub use turn::{Speaker, Turn};
