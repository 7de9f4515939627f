//! Chat provider adapters.

mod gemini_provider;
mod mock_provider;
mod openrouter_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::MockChatProvider;
pub use openrouter_provider::{OpenRouterConfig, OpenRouterProvider};
