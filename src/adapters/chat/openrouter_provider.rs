//! OpenRouter Provider - ChatProvider implementation for the OpenRouter API.
//!
//! Talks to the OpenAI-compatible `/chat/completions` endpoint with Bearer
//! authentication. OpenRouter asks clients to identify themselves via the
//! `HTTP-Referer` and `X-Title` headers, so both are configurable.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenRouterConfig::new(api_key)
//!     .with_model("google/gemini-2.0-flash-001")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let provider = OpenRouterProvider::new(config);
//! ```

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    ChatError, ChatProvider, ChatRequest, ChatResponse, ChatRole, ProviderInfo,
};

const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Configuration for the OpenRouter provider.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to route to.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Value for the `HTTP-Referer` identification header.
    pub referer: String,
    /// Value for the `X-Title` identification header.
    pub app_title: String,
}

impl OpenRouterConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            referer: "https://robo-coach.local/".to_string(),
            app_title: "Robo-Coach".to_string(),
        }
    }

    /// Sets the model to route to.
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

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenRouter API provider implementation.
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    /// Creates a new OpenRouter provider with the given configuration.
    pub fn new(config: OpenRouterConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the OpenRouter wire format.
    fn to_wire_request(&self, request: &ChatRequest) -> WireRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(WireMessage {
                role: match msg.role {
                    ChatRole::System => "system",
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        WireRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &ChatRequest) -> Result<Response, ChatError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
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

    /// Parses the API response status and handles errors.
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
impl ChatProvider for OpenRouterProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| ChatError::parse(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::parse("response contained no choices"))?;

        tracing::debug!(model = %self.config.model, "openrouter completion received");

        Ok(ChatResponse {
            content: choice.message.content,
            model: body.model.unwrap_or_else(|| self.config.model.clone()),
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openrouter", &self.config.model)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}
