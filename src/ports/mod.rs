//! Ports - trait boundaries to the external collaborators.
//!
//! The core never talks to an API directly; it goes through these traits so
//! the session logic can be exercised against mocks.

mod chat_provider;
mod speech_provider;

pub use chat_provider::{
    ChatError, ChatMessage, ChatProvider, ChatRequest, ChatResponse, ChatRole, ProviderInfo,
};
pub use speech_provider::{AudioClip, SpeechError, SpeechProvider};
