// tests/http_api.rs
// Router-level tests for the handlers that never leave the process.
// Vendor-backed paths (chat replies, image, speech) are exercised only up to
// their input validation; no test here talks to the network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use roy::api::http::router::api_router;
use roy::config::CONFIG;
use roy::llm::{AnthropicClient, OpenAIClient, StabilityClient};
use roy::persona::PersonaOverlay;
use roy::session::SessionStore;
use roy::state::AppState;

fn test_state() -> Arc<AppState> {
    // Clients get dummy keys and an unroutable base URL; tests never send.
    Arc::new(AppState {
        store: Arc::new(SessionStore::new(
            CONFIG.idle_threshold(),
            CONFIG.history_window,
        )),
        persona: PersonaOverlay::Roy,
        chat_client: Arc::new(AnthropicClient::with_key("test-key", "http://127.0.0.1:9")),
        image_client: Arc::new(StabilityClient::with_key("test-key", "http://127.0.0.1:9")),
        speech_client: Arc::new(OpenAIClient::with_key("test-key", "http://127.0.0.1:9")),
    })
}

fn app(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_router()).with_state(state)
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.expect("body collects").to_bytes();
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn health_reports_session_count() {
    let state = test_state();
    state
        .store
        .record_user_message("s1", "hello", Utc::now())
        .await;

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["active_sessions"], 1);
}

#[tokio::test]
async fn history_for_unknown_session_is_empty_not_an_error() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/api/chat/history?session_id=ghost")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["session_id"], "ghost");
    assert_eq!(json["messages"], json!([]));
}

#[tokio::test]
async fn history_returns_recorded_turns_oldest_first() {
    let state = test_state();
    let now = Utc::now();
    state
        .store
        .record_user_message("s1", "I feel anxious about work", now)
        .await;
    state
        .store
        .record_assistant_reply("s1", "Tell me more.", now)
        .await;

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/api/chat/history?session_id=s1&limit=10")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    let messages = json["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["text"], "Tell me more.");
}

#[tokio::test]
async fn empty_chat_message_is_rejected() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "message": "   " }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn malformed_chat_body_is_a_client_error() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not:json"))
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn empty_exercise_stressor_is_rejected() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/exercise")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "stressor": "  " }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], true);
}

#[tokio::test]
async fn empty_image_prompt_is_rejected() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "prompt": "" }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_speech_text_is_rejected() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/speak")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "text": "" }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transcribe_without_multipart_is_a_client_error() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transcribe")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("request builds"),
        )
        .await
        .expect("request routes");

    assert!(response.status().is_client_error());
}
