//! Adapters - concrete implementations of the collaborator ports.

pub mod chat;
pub mod speech;

pub use chat::{
    GeminiConfig, GeminiProvider, MockChatProvider, OpenRouterConfig, OpenRouterProvider,
};
pub use speech::{ElevenLabsConfig, ElevenLabsProvider, MockSpeechProvider};
