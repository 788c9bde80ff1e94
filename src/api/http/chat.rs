// src/api/http/chat.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::classifier::EmotionalState;
use crate::config::CONFIG;
use crate::llm::ChatTurn;
use crate::prompt::build_system_prompt;
use crate::session::{generate_session_id, Role, Turn};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omitted on the first message; the server mints one.
    pub session_id: Option<String>,
    /// Stressors the user declared up front, folded into the system prompt.
    pub stressors: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    pub emotional_state: EmotionalState,
    pub topics: Vec<String>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub session_id: String,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ChatHistoryMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ChatHistoryResponse {
    pub session_id: String,
    pub messages: Vec<ChatHistoryMessage>,
}

/// Session-aware chat turn.
///
/// The store mutation (classify + merge + record) happens first and holds the
/// lock only for that in-memory work; the prompt is composed from the
/// returned snapshot and the vendor call runs with no lock held. If the
/// vendor call fails or the caller aborts, the user turn stays recorded.
pub async fn chat_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_session_id);
    let stressors = request.stressors.unwrap_or_default();
    let now = Utc::now();

    let snapshot = app_state
        .store
        .record_user_message(&session_id, &request.message, now)
        .await;

    debug!(
        "session {} classified as {} with {} topics",
        session_id,
        snapshot.emotional_state,
        snapshot.topics.len()
    );

    let system_prompt = build_system_prompt(
        &app_state.persona,
        &stressors,
        &snapshot,
        CONFIG.wrap_up_after_minutes,
    );

    let messages = wire_messages(&snapshot.recent);

    let reply = app_state
        .chat_client
        .create_message(&system_prompt, &messages)
        .await?;

    app_state
        .store
        .record_assistant_reply(&session_id, &reply, Utc::now())
        .await;

    info!("chat turn completed for session {}", session_id);

    Ok(Json(ChatResponse {
        session_id,
        response: reply,
        emotional_state: snapshot.emotional_state,
        topics: snapshot.topics.iter().map(|t| t.to_string()).collect(),
    }))
}

/// Convert the bounded recent window into the messages-API wire shape.
///
/// The window can begin mid-exchange once older turns fall off, and the
/// messages API rejects a conversation that opens with an assistant turn, so
/// leading assistant turns are dropped.
fn wire_messages(recent: &[Turn]) -> Vec<ChatTurn> {
    let start = recent
        .iter()
        .position(|turn| turn.role == Role::User)
        .unwrap_or(recent.len());
    recent[start..]
        .iter()
        .map(|turn| ChatTurn {
            role: turn.role.as_str().to_string(),
            content: turn.text.clone(),
        })
        .collect()
}

/// Recent turns for a session. Unknown sessions yield an empty list rather
/// than an error.
pub async fn get_chat_history(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> ApiResult<Json<ChatHistoryResponse>> {
    let limit = params
        .limit
        .unwrap_or(CONFIG.history_window)
        .min(CONFIG.history_max_limit);

    let messages = app_state
        .store
        .history(&params.session_id, limit)
        .await
        .into_iter()
        .map(|turn| ChatHistoryMessage {
            role: turn.role,
            text: turn.text,
            timestamp: turn.timestamp,
        })
        .collect();

    Ok(Json(ChatHistoryResponse {
        session_id: params.session_id,
        messages,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: Role, text: &str) -> Turn {
        Turn {
            role,
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn wire_messages_drop_leading_assistant_turns() {
        let recent = vec![
            turn(Role::Assistant, "reply that slid past the window edge"),
            turn(Role::User, "still anxious about work"),
            turn(Role::Assistant, "tell me more"),
            turn(Role::User, "it keeps me up at night"),
        ];

        let messages = wire_messages(&recent);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "still anxious about work");
        assert_eq!(messages[2].role, "user");
    }

    #[test]
    fn wire_messages_keep_a_user_led_window_intact() {
        let recent = vec![
            turn(Role::User, "hello"),
            turn(Role::Assistant, "hi there"),
        ];

        let messages = wire_messages(&recent);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
    }

    #[test]
    fn wire_messages_with_no_user_turn_are_empty() {
        let recent = vec![turn(Role::Assistant, "orphaned reply")];
        assert!(wire_messages(&recent).is_empty());
    }
}
