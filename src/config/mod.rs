//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `ROBO_COACH` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use robo_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod chat;
mod error;
mod speech;

pub use chat::{ChatBackend, ChatConfig};
pub use error::{ConfigError, ValidationError};
pub use speech::SpeechConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains the chat and speech collaborator sections. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Chat collaborator configuration (required)
    #[serde(default)]
    pub chat: ChatConfig,

    /// Speech collaborator configuration (optional, text-only without it)
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `ROBO_COACH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `ROBO_COACH__CHAT__API_KEY=sk-or-v1-...` -> `chat.api_key`
    /// - `ROBO_COACH__SPEECH__TIMEOUT_SECS=5` -> `speech.timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ROBO_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The chat collaborator is required; the speech collaborator may be
    /// absent (text-only degraded mode is explicitly allowed).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.chat.validate()?;
        self.speech.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_chat_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_with_chat_key_validates() {
        let config = AppConfig {
            chat: ChatConfig {
                api_key: Some("sk-or-v1-abc".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
