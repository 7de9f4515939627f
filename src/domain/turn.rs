//! Turn entity for conversations.
//!
//! Turns are immutable records of one message in the coaching exchange.
//! Each turn has a speaker (user/coach), content, and timestamp.

use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The rookie engineer typing into the app.
    User,
    /// The coach persona generated by the chat collaborator.
    Coach,
}

impl Speaker {
    /// Returns true if this turn came from the user.
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }
}

/// An immutable turn within a conversation.
///
/// # Invariants
///
/// - `content` is non-empty (validated at construction)
/// - fields are private and never change after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced this turn.
    speaker: Speaker,

    /// The text of the turn.
    content: String,

    /// When the turn was recorded.
    created_at: DateTime<Utc>,
}

impl Turn {
    /// Creates a new turn with the given speaker and content.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is empty or whitespace only
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::empty_field("content"));
        }

        Ok(Self {
            speaker,
            content,
            created_at: Utc::now(),
        })
    }

    /// Creates a user turn.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is empty or whitespace only
    pub fn user(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Speaker::User, content)
    }

    /// Creates a coach turn.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is empty or whitespace only
    pub fn coach(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Speaker::Coach, content)
    }

    /// Returns the speaker.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the turn was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if this turn came from the user.
    pub fn is_user(&self) -> bool {
        self.speaker.is_user()
    }
}
