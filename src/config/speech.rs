//! Speech collaborator configuration
//!
//! Speech is optional: a missing key is a valid, text-only configuration,
//! not a validation failure.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Speech collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// API key for the speech collaborator; absent means text-only mode
    pub api_key: Option<String>,

    /// Voice to synthesize with
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SpeechConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if speech synthesis is enabled
    pub fn enabled(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate speech configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: default_voice_id(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_voice_id() -> String {
    "JBFqnCBsd6RMkjVDRZzb".to_string()
}

fn default_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_config_defaults() {
        let config = SpeechConfig::default();
        assert_eq!(config.voice_id, "JBFqnCBsd6RMkjVDRZzb");
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.enabled());
    }

    #[test]
    fn test_missing_key_is_valid() {
        let config = SpeechConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_with_key() {
        let config = SpeechConfig {
            api_key: Some("xi-abc".to_string()),
            ..Default::default()
        };
        assert!(config.enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_is_disabled() {
        let config = SpeechConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.enabled());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = SpeechConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
