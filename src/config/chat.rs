//! Chat collaborator configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Chat collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// API key for the chat collaborator
    pub api_key: Option<String>,

    /// Explicit backend selection; when absent the backend is detected
    /// from the key format
    pub backend: Option<ChatBackend>,

    /// Model override (each backend has its own default)
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Which chat API the session talks to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatBackend {
    OpenRouter,
    Gemini,
}

impl ChatConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a chat API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Resolve the backend: explicit setting wins, otherwise OpenRouter keys
    /// are recognized by their `sk-or-v1-` prefix and anything else is
    /// treated as a Gemini key.
    pub fn resolved_backend(&self) -> ChatBackend {
        if let Some(backend) = self.backend {
            return backend;
        }

        match self.api_key.as_deref() {
            Some(key) if key.starts_with("sk-or-v1-") => ChatBackend::OpenRouter,
            _ => ChatBackend::Gemini,
        }
    }

    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ROBO_COACH__CHAT__API_KEY"));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            backend: None,
            model: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
