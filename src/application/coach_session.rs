//! Coach session - one interactive coaching conversation.
//!
//! Orchestrates a request/response cycle: classify the user message, format
//! the mode directive, call the chat collaborator with the full history,
//! append the exchange to the conversation, and optionally synthesize speech
//! for the reply.
//!
//! Collaborator failures never escape `submit`: a chat failure becomes a
//! placeholder coach turn, a speech failure becomes a text-only result.
//! `submit` takes `&mut self`, so a second submission against the same
//! conversation cannot start while one is in flight.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{
    format_directive, select_mode, Conversation, DomainError, Mode, COACH_SYSTEM_PROMPT,
};
use crate::ports::{AudioClip, ChatProvider, ChatRequest, ChatRole, SpeechProvider};

/// Coach turn recorded when the chat collaborator fails.
///
/// Always shown instead of raw error detail; the detail goes to the log.
pub const FAILURE_PLACEHOLDER: &str =
    "SYSTEM FAILURE! COACH LOST THE CONNECTION. TRY AGAIN, ROOKIE!";

/// Errors rejected before any turn is appended.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    /// Submission text was empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyInput,

    /// Domain error while recording turns.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for SubmitError {
    fn from(err: DomainError) -> Self {
        SubmitError::Domain(err.to_string())
    }
}

/// Result of one completed submission.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Prompt mode selected for this submission.
    pub mode: Mode,
    /// The coach reply (or the failure placeholder).
    pub coach_text: String,
    /// Synthesized audio for the reply, when available.
    pub audio: Option<AudioClip>,
}

/// One interactive coaching session owning its conversation.
pub struct CoachSession {
    conversation: Conversation,
    chat: Arc<dyn ChatProvider>,
    speech: Option<Arc<dyn SpeechProvider>>,
    system_prompt: String,
}

impl CoachSession {
    /// Creates a session with an empty conversation.
    ///
    /// `speech` is optional: without it the session runs text-only.
    pub fn new(chat: Arc<dyn ChatProvider>, speech: Option<Arc<dyn SpeechProvider>>) -> Self {
        Self {
            conversation: Conversation::new(),
            chat,
            speech,
            system_prompt: COACH_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Overrides the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Returns the conversation history.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Handles one user submission end to end.
    ///
    /// Appends exactly two turns (user + coach) whether or not the chat
    /// collaborator succeeds; the user always sees something for their
    /// submission.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if the text is empty or whitespace only (nothing is
    ///   appended)
    pub async fn submit(&mut self, text: &str) -> Result<Exchange, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        // Mode depends on whether this is the first turn, read before the append.
        let is_first_turn = self.conversation.is_first_turn();
        let mode = select_mode(text, is_first_turn);
        let directive = format_directive(text, mode);

        // The wire request carries prior history plus the directive-formatted
        // message; the log keeps the raw text only.
        let request = self.build_request(directive);

        self.conversation.push_user(text)?;
        debug_assert!(self.conversation.has_open_exchange());

        info!(%mode, is_first_turn, "submitting to chat collaborator");

        // A blank reply would leave the user turn unanswered, so it takes the
        // same placeholder path as a transport failure.
        let coach_text = match self.chat.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => response.content,
            Ok(_) => {
                error!("chat collaborator returned an empty reply");
                FAILURE_PLACEHOLDER.to_string()
            }
            Err(err) => {
                error!(error = %err, retryable = err.is_retryable(), "chat collaborator failed");
                FAILURE_PLACEHOLDER.to_string()
            }
        };

        self.conversation.push_coach(&coach_text)?;
        debug_assert!(!self.conversation.has_open_exchange());

        let audio = self.synthesize(&coach_text).await;

        Ok(Exchange {
            mode,
            coach_text,
            audio,
        })
    }

    /// Clears the conversation. Idempotent; always succeeds.
    pub fn reset(&mut self) {
        self.conversation.clear();
        info!("conversation reset");
    }

    fn build_request(&self, directive: String) -> ChatRequest {
        let mut request = ChatRequest::new().with_system_prompt(&self.system_prompt);

        for turn in self.conversation.turns() {
            let role = if turn.is_user() {
                ChatRole::User
            } else {
                ChatRole::Assistant
            };
            request = request.with_message(role, turn.content());
        }

        request.with_message(ChatRole::User, directive)
    }

    /// Best-effort speech synthesis; absence and failure both degrade to
    /// text-only.
    async fn synthesize(&self, text: &str) -> Option<AudioClip> {
        let provider = self.speech.as_ref()?;

        match provider.synthesize(text).await {
            Ok(clip) => Some(clip),
            Err(err) => {
                warn!(error = %err, "speech collaborator failed, continuing text-only");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockChatProvider, MockSpeechProvider};
    use crate::domain::Speaker;
    use crate::ports::ChatError;

    fn session_with(chat: MockChatProvider) -> CoachSession {
        CoachSession::new(Arc::new(chat), None)
    }

    #[tokio::test]
    async fn rejects_empty_input_without_appending() {
        let mut session = session_with(MockChatProvider::new());

        let err = session.submit("   ").await.unwrap_err();

        assert!(matches!(err, SubmitError::EmptyInput));
        assert!(session.conversation().is_empty());
    }

    #[tokio::test]
    async fn first_turn_forces_clarify_for_specific_text() {
        let chat = MockChatProvider::new().with_response("WHICH SENSOR, ROOKIE?");
        let mut session = session_with(chat.clone());

        let exchange = session.submit("the servo keeps twitching").await.unwrap();

        assert_eq!(exchange.mode, Mode::Clarify);
        let wire = chat.last_call().unwrap();
        assert!(wire
            .messages
            .last()
            .unwrap()
            .content
            .contains("MODE 1 - Ask Details"));
    }

    #[tokio::test]
    async fn follow_up_specific_text_solves_with_history() {
        let chat = MockChatProvider::new()
            .with_response("WHAT SENSOR?")
            .with_response("RAISE THE COLOR THRESHOLD!");
        let mut session = session_with(chat.clone());

        session.submit("help").await.unwrap();
        let exchange = session
            .submit("the color sensor keeps losing the line")
            .await
            .unwrap();

        assert_eq!(exchange.mode, Mode::Solve);
        assert_eq!(session.conversation().len(), 4);

        let wire = chat.last_call().unwrap();
        // prior user + prior coach + new directive
        assert_eq!(wire.messages.len(), 3);
        assert_eq!(wire.messages[0].content, "help");
        assert_eq!(wire.messages[1].content, "WHAT SENSOR?");
        assert!(wire
            .messages
            .last()
            .unwrap()
            .content
            .contains("MODE 2 - Solution"));
    }

    #[tokio::test]
    async fn log_keeps_raw_text_not_directive() {
        let chat = MockChatProvider::new().with_response("WHAT SENSOR?");
        let mut session = session_with(chat);

        session.submit("help").await.unwrap();

        let turns = session.conversation().turns();
        assert_eq!(turns[0].content(), "help");
        assert_eq!(turns[0].speaker(), Speaker::User);
        assert_eq!(turns[1].content(), "WHAT SENSOR?");
        assert_eq!(turns[1].speaker(), Speaker::Coach);
    }

    #[tokio::test]
    async fn chat_failure_appends_placeholder_pair() {
        let chat = MockChatProvider::new().with_error(ChatError::Timeout { timeout_secs: 10 });
        let mut session = session_with(chat);

        let exchange = session.submit("robot won't move").await.unwrap();

        assert_eq!(exchange.coach_text, FAILURE_PLACEHOLDER);
        assert!(!exchange.coach_text.is_empty());
        assert_eq!(session.conversation().len(), 2);
        assert_eq!(session.conversation().turns()[1].content(), FAILURE_PLACEHOLDER);
    }

    #[tokio::test]
    async fn empty_reply_substitutes_placeholder_pair() {
        let chat = MockChatProvider::new().with_response("   ");
        let mut session = session_with(chat);

        let exchange = session.submit("robot won't move").await.unwrap();

        assert_eq!(exchange.coach_text, FAILURE_PLACEHOLDER);
        assert_eq!(session.conversation().len(), 2);
        assert!(!session.conversation().has_open_exchange());
    }

    #[tokio::test]
    async fn speech_failure_degrades_to_text_only() {
        let chat = MockChatProvider::new().with_response("CHECK THE BATTERY!");
        let speech = MockSpeechProvider::new()
            .with_error(crate::ports::SpeechError::unavailable("503"));
        let mut session = CoachSession::new(Arc::new(chat), Some(Arc::new(speech)));

        let exchange = session.submit("it reboots mid-run always").await.unwrap();

        assert_eq!(exchange.coach_text, "CHECK THE BATTERY!");
        assert!(exchange.audio.is_none());
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test]
    async fn speech_success_attaches_audio() {
        let chat = MockChatProvider::new().with_response("CHECK THE BATTERY!");
        let speech = MockSpeechProvider::new().with_audio(vec![1, 2, 3]);
        let mut session = CoachSession::new(Arc::new(chat), Some(Arc::new(speech.clone())));

        let exchange = session.submit("it reboots mid-run always").await.unwrap();

        assert_eq!(exchange.audio.unwrap().bytes, vec![1, 2, 3]);
        assert_eq!(speech.get_calls(), vec!["CHECK THE BATTERY!"]);
    }

    #[tokio::test]
    async fn reset_then_submit_matches_fresh_session() {
        let chat = MockChatProvider::new()
            .with_response("WHAT SENSOR?")
            .with_response("WHAT SENSOR?");
        let mut session = session_with(chat.clone());

        session.submit("help").await.unwrap();
        session.reset();
        assert!(session.conversation().is_empty());

        let exchange = session.submit("help").await.unwrap();

        // Same clarify mode and no residual history on the wire.
        assert_eq!(exchange.mode, Mode::Clarify);
        let wire = chat.last_call().unwrap();
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let mut session = session_with(MockChatProvider::new());
        session.reset();
        session.reset();
        assert!(session.conversation().is_empty());
    }
}
