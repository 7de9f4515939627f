//! Terminal entrypoint for Robo-Coach.
//!
//! Thin presentation layer over the coach session: loads and validates the
//! configuration, wires the collaborator adapters, and runs a line-oriented
//! chat loop. `/reset` clears the conversation, `/quit` exits.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use robo_coach::adapters::{
    ElevenLabsConfig, ElevenLabsProvider, GeminiConfig, GeminiProvider, OpenRouterConfig,
    OpenRouterProvider,
};
use robo_coach::application::CoachSession;
use robo_coach::config::{AppConfig, ChatBackend, ChatConfig, SpeechConfig};
use robo_coach::ports::{ChatProvider, SpeechProvider};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    config
        .validate()
        .context("invalid configuration; set ROBO_COACH__CHAT__API_KEY")?;

    let chat = build_chat_provider(&config.chat);
    let speech = build_speech_provider(&config.speech);

    info!(
        provider = %chat.provider_info().name,
        speech_enabled = speech.is_some(),
        "robo-coach starting"
    );

    let mut session = CoachSession::new(chat, speech);

    println!("OLYMPIC ROBO-COACH. Vent your problems, rookie. (/reset, /quit)");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                session.reset();
                println!("(conversation cleared)");
                continue;
            }
            text => match session.submit(text).await {
                Ok(exchange) => {
                    println!("COACH: {}", exchange.coach_text);
                    if let Some(clip) = exchange.audio {
                        println!("({} bytes of coach screaming synthesized)", clip.bytes.len());
                    }
                }
                Err(err) => println!("({})", err),
            },
        }
    }

    Ok(())
}

fn build_chat_provider(config: &ChatConfig) -> Arc<dyn ChatProvider> {
    // validate() guarantees the key is present by the time we get here.
    let api_key = config.api_key.clone().unwrap_or_default();

    match config.resolved_backend() {
        ChatBackend::OpenRouter => {
            let mut provider_config =
                OpenRouterConfig::new(api_key).with_timeout(config.timeout());
            if let Some(ref model) = config.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(OpenRouterProvider::new(provider_config))
        }
        ChatBackend::Gemini => {
            let mut provider_config = GeminiConfig::new(api_key).with_timeout(config.timeout());
            if let Some(ref model) = config.model {
                provider_config = provider_config.with_model(model);
            }
            Arc::new(GeminiProvider::new(provider_config))
        }
    }
}

fn build_speech_provider(config: &SpeechConfig) -> Option<Arc<dyn SpeechProvider>> {
    if !config.enabled() {
        return None;
    }

    let provider_config = ElevenLabsConfig::new(config.api_key.clone()?)
        .with_voice_id(&config.voice_id)
        .with_timeout(config.timeout());

    Some(Arc::new(ElevenLabsProvider::new(provider_config)))
}
