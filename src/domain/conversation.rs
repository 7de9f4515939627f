//! Conversation log - ordered, append-only turn history.
//!
//! The conversation is owned by exactly one session at a time; exclusive
//! ownership is expressed through `&mut self`, not locking. Turns are only
//! ever appended (user turn, then coach turn) and only discarded by an
//! explicit `clear`.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::turn::{Speaker, Turn};

/// Ordered sequence of turns for one coaching session.
///
/// # Invariants
///
/// - Turns are appended in strict chronological order and never reordered.
/// - After any completed exchange the turn count is even (user + coach);
///   it is odd only transiently, while a submission is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Appends a user turn.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is empty or whitespace only
    pub fn push_user(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.turns.push(Turn::user(content)?);
        Ok(())
    }

    /// Appends a coach turn.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is empty or whitespace only
    pub fn push_coach(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.turns.push(Turn::coach(content)?);
        Ok(())
    }

    /// Returns all turns in chronological order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turns have been recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns true if the next user submission would be the first of the
    /// conversation.
    pub fn is_first_turn(&self) -> bool {
        !self.turns.iter().any(Turn::is_user)
    }

    /// Returns true if a user turn is awaiting its coach reply.
    pub fn has_open_exchange(&self) -> bool {
        self.turns.last().is_some_and(Turn::is_user)
    }

    /// Discards all turns. Idempotent; always succeeds.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
