//! Speech provider adapters.

mod elevenlabs_provider;
mod mock_provider;

pub use elevenlabs_provider::{ElevenLabsConfig, ElevenLabsProvider};
pub use mock_provider::MockSpeechProvider;
