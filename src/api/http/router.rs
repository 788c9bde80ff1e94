// src/api/http/router.rs
// HTTP router composition for the REST API

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::{
    chat::{chat_handler, get_chat_history},
    exercise::exercise_handler,
    handlers::health_handler,
    image::generate_handler,
    speech::{speak_handler, transcribe_handler},
};
use crate::state::AppState;

/// Main HTTP router. Nested under /api in main.rs.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/health", get(health_handler))
        // Chat (session-aware)
        .route("/chat", post(chat_handler))
        .route("/chat/history", get(get_chat_history))
        .route("/exercise", post(exercise_handler))
        // Mood Into Art
        .route("/generate", post(generate_handler))
        // Speech
        .route("/speak", post(speak_handler))
        .route("/transcribe", post(transcribe_handler))
}
