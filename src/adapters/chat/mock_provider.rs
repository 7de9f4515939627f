//! Mock chat provider for testing.
//!
//! Configurable mock implementation of the ChatProvider port, allowing
//! session logic to be exercised without calling a real chat API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for resilience testing
//! - Simulated delays for timeout testing
//! - Call tracking for verification

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ChatError, ChatProvider, ChatRequest, ChatResponse, ProviderInfo};

/// A configured mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success(String),
    Error(ChatError),
}

/// Mock chat provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockChatProvider {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: ChatError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the most recent recorded call.
    pub fn last_call(&self) -> Option<ChatRequest> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Success("Mock response".to_string()))
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Success(content) => Ok(ChatResponse {
                content,
                model: "mock-model-1".to_string(),
            }),
            MockOutcome::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ChatRole;

    fn test_request() -> ChatRequest {
        ChatRequest::new().with_message(ChatRole::User, "Hello")
    }

    #[tokio::test]
    async fn returns_configured_response() {
        let provider = MockChatProvider::new().with_response("WHAT SENSOR?");

        let response = provider.complete(test_request()).await.unwrap();

        assert_eq!(response.content, "WHAT SENSOR?");
        assert_eq!(response.model, "mock-model-1");
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let provider = MockChatProvider::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(provider.complete(test_request()).await.unwrap().content, "First");
        assert_eq!(provider.complete(test_request()).await.unwrap().content, "Second");
    }

    #[tokio::test]
    async fn returns_default_after_exhausted() {
        let provider = MockChatProvider::new().with_response("Only one");

        provider.complete(test_request()).await.unwrap();
        let fallback = provider.complete(test_request()).await.unwrap();

        assert_eq!(fallback.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider =
            MockChatProvider::new().with_error(ChatError::Timeout { timeout_secs: 10 });

        let err = provider.complete(test_request()).await.unwrap_err();
        assert!(matches!(err, ChatError::Timeout { timeout_secs: 10 }));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockChatProvider::new().with_response("r1").with_response("r2");

        assert_eq!(provider.call_count(), 0);
        provider.complete(test_request()).await.unwrap();
        provider.complete(test_request()).await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].messages[0].content, "Hello");
    }

    #[tokio::test]
    async fn respects_delay() {
        let provider = MockChatProvider::new()
            .with_response("Delayed")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(test_request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
