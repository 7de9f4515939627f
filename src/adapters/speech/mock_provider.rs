//! Mock speech provider for testing.
//!
//! Scripted audio/error outcomes plus call recording, mirroring the mock
//! chat provider.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AudioClip, SpeechError, SpeechProvider};

/// Mock speech provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSpeechProvider {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<Result<AudioClip, SpeechError>>>>,
    /// Texts this provider was asked to synthesize.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSpeechProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful audio clip to the queue.
    pub fn with_audio(self, bytes: Vec<u8>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(AudioClip::mp3(bytes)));
        self
    }

    /// Adds an error outcome to the queue.
    pub fn with_error(self, error: SpeechError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns the number of synthesis calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all texts this provider was asked to synthesize.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError> {
        self.calls.lock().unwrap().push(text.to_string());

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AudioClip::mp3(vec![0xff, 0xfb])))
    }
}
