//! ElevenLabs Provider - SpeechProvider implementation for the ElevenLabs
//! text-to-speech API.
//!
//! Authenticates via the `xi-api-key` header and returns MP3 bytes on
//! success. The short default timeout keeps the session snappy: audio is a
//! best-effort enhancement and a slow speech service must not stall the
//! text reply.

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{AudioClip, SpeechError, SpeechProvider};

const DEFAULT_VOICE_ID: &str = "JBFqnCBsd6RMkjVDRZzb";
const DEFAULT_MODEL_ID: &str = "eleven_flash_v2_5";
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Configuration for the ElevenLabs provider.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Voice to synthesize with.
    pub voice_id: String,
    /// TTS model to use.
    pub model_id: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Voice stability setting.
    pub stability: f64,
    /// Voice similarity boost setting.
    pub similarity_boost: f64,
}

impl ElevenLabsConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            stability: 0.5,
            similarity_boost: 0.8,
        }
    }

    /// Sets the voice to synthesize with.
    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// ElevenLabs API provider implementation.
pub struct ElevenLabsProvider {
    config: ElevenLabsConfig,
    client: Client,
}

impl ElevenLabsProvider {
    /// Creates a new ElevenLabs provider with the given configuration.
    pub fn new(config: ElevenLabsConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn synthesis_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url, self.config.voice_id
        )
    }

    fn to_wire_request(&self, text: &str) -> WireRequest {
        WireRequest {
            text: text.to_string(),
            model_id: self.config.model_id.clone(),
            voice_settings: WireVoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        }
    }
}

#[async_trait::async_trait]
impl SpeechProvider for ElevenLabsProvider {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError> {
        let response = self
            .client
            .post(self.synthesis_url())
            .header("xi-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&self.to_wire_request(text))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else {
                    SpeechError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return match status.as_u16() {
                401 | 403 => Err(SpeechError::AuthenticationFailed),
                500..=599 => Err(SpeechError::unavailable(format!(
                    "Server error {}: {}",
                    status, error_body
                ))),
                _ => Err(SpeechError::network(format!(
                    "Unexpected status {}: {}",
                    status, error_body
                ))),
            };
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::network(e.to_string()))?;

        tracing::debug!(voice = %self.config.voice_id, bytes = bytes.len(), "speech synthesized");

        Ok(AudioClip::mp3(bytes.to_vec()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireRequest {
    text: String,
    model_id: String,
    voice_settings: WireVoiceSettings,
}

#[derive(Debug, Serialize)]
struct WireVoiceSettings {
    stability: f64,
    similarity_boost: f64,
}
