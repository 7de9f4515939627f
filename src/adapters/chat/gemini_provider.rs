//! Gemini Provider - ChatProvider implementation for the Gemini API.
//!
//! Talks directly to the `generateContent` endpoint. Unlike the
//! OpenAI-compatible wire format, Gemini takes the system instruction as a
//! separate field, names the assistant role `model`, and authenticates via a
//! `key` query parameter rather than a header.

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    ChatError, ChatProvider, ChatRequest, ChatResponse, ChatRole, ProviderInfo,
};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
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

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    // Key travels in the query string; never log this URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url,
            self.config.model,
            self.config.api_key()
        )
    }

    /// Converts our request to the Gemini wire format.
    fn to_wire_request(&self, request: &ChatRequest) -> WireRequest {
        let contents = request
            .messages
            .iter()
            .map(|msg| WireContent {
                role: Some(
                    match msg.role {
                        // Gemini has no system role in contents; system text
                        // goes through system_instruction instead.
                        ChatRole::System | ChatRole::User => "user",
                        ChatRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![WirePart {
                    text: msg.content.clone(),
                }],
            })
            .collect();

        WireRequest {
            system_instruction: request.system_prompt.as_ref().map(|prompt| WireContent {
                role: None,
                parts: vec![WirePart {
                    text: prompt.clone(),
                }],
            }),
            contents,
        }
    }

    async fn send_request(&self, request: &ChatRequest) -> Result<Response, ChatError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.generate_url())
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ChatError::network(format!("Connection failed: {}", e))
                } else {
                    ChatError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, ChatError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(ChatError::AuthenticationFailed),
            429 => Err(ChatError::RateLimited {
                retry_after_secs: 30,
            }),
            400 => Err(ChatError::InvalidRequest(error_body)),
            500..=599 => Err(ChatError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(ChatError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait::async_trait]
impl ChatProvider for GeminiProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| ChatError::parse(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| ChatError::parse("response contained no candidates"))?;

        tracing::debug!(model = %self.config.model, "gemini completion received");

        Ok(ChatResponse {
            content: text,
            model: self.config.model.clone(),
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    contents: Vec<WireContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: WireContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new("AIza-test"))
    }

    #[test]
    fn config_defaults_match_service() {
        let config = GeminiConfig::new("AIza-test");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn generate_url_embeds_model_and_key() {
        let url = provider().generate_url();
        assert!(url.starts_with(
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key="
        ));
        assert!(url.ends_with("AIza-test"));
    }

    #[test]
    fn wire_request_maps_roles_and_system_instruction() {
        let request = ChatRequest::new()
            .with_system_prompt("Be loud")
            .with_message(ChatRole::User, "help")
            .with_message(ChatRole::Assistant, "WHAT SENSOR?");

        let wire = provider().to_wire_request(&request);

        let system = wire.system_instruction.unwrap();
        assert!(system.role.is_none());
        assert_eq!(system.parts[0].text, "Be loud");

        assert_eq!(wire.contents.len(), 2);
        assert_eq!(wire.contents[0].role.as_deref(), Some("user"));
        assert_eq!(wire.contents[1].role.as_deref(), Some("model"));
        assert_eq!(wire.contents[1].parts[0].text, "WHAT SENSOR?");
    }

    #[test]
    fn wire_response_parses_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "CHECK THE BATTERY!"}]}}
            ]
        }"#;
        let parsed: WireResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.candidates[0].content.parts[0].text,
            "CHECK THE BATTERY!"
        );
    }
}
