// src/state.rs

use std::sync::Arc;

use crate::{
    config::CONFIG,
    llm::{AnthropicClient, OpenAIClient, StabilityClient},
    persona::PersonaOverlay,
    session::SessionStore,
};

/// Everything the HTTP handlers share.
#[derive(Clone)]
pub struct AppState {
    // -------- Core --------
    pub store: Arc<SessionStore>,
    pub persona: PersonaOverlay,

    // -------- Vendor clients --------
    pub chat_client: Arc<AnthropicClient>,
    pub image_client: Arc<StabilityClient>,
    pub speech_client: Arc<OpenAIClient>,
}

/// Build the state from configuration and environment-held API keys. The
/// session store is the explicitly-owned tracker; nothing else holds
/// per-session state.
pub fn create_app_state() -> anyhow::Result<AppState> {
    let store = Arc::new(SessionStore::new(
        CONFIG.idle_threshold(),
        CONFIG.history_window,
    ));

    Ok(AppState {
        store,
        persona: PersonaOverlay::Roy,
        chat_client: Arc::new(AnthropicClient::new()?),
        image_client: Arc::new(StabilityClient::new()?),
        speech_client: Arc::new(OpenAIClient::new()?),
    })
}
