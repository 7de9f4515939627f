//! Speech Provider Port - interface to the text-to-speech collaborator.
//!
//! Speech is an optional, best-effort enhancement: the session carries an
//! `Option<Arc<dyn SpeechProvider>>` and any failure here degrades to a
//! text-only result instead of propagating.

use async_trait::async_trait;

/// Port for text-to-speech collaborators.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize audio for the given text.
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError>;
}

/// Synthesized audio returned by a speech collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Raw audio bytes.
    pub bytes: Vec<u8>,
    /// MIME type of the audio (e.g., "audio/mpeg").
    pub mime_type: String,
}

impl AudioClip {
    /// Creates a new audio clip.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Creates an MP3 clip.
    pub fn mp3(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "audio/mpeg")
    }

    /// Returns true if the clip carries no audio data.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Speech collaborator errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpeechError {
    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl SpeechError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mp3_clip_sets_mime_type() {
        let clip = AudioClip::mp3(vec![0xff, 0xfb]);
        assert_eq!(clip.mime_type, "audio/mpeg");
        assert!(!clip.is_empty());
    }

    #[test]
    fn empty_clip_is_empty() {
        assert!(AudioClip::mp3(Vec::new()).is_empty());
    }

    #[test]
    fn speech_error_displays_correctly() {
        assert_eq!(
            SpeechError::Timeout { timeout_secs: 5 }.to_string(),
            "request timed out after 5s"
        );
        assert_eq!(
            SpeechError::unavailable("503").to_string(),
            "provider unavailable: 503"
        );
    }
}
