// src/api/http/speech.rs

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::config::CONFIG;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    pub voice: Option<String>,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

/// Text-to-speech pass-through. Audio bytes go straight back to the caller.
pub async fn speak_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SpeakRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("text must not be empty"));
    }

    let voice = request.voice.unwrap_or_else(|| CONFIG.tts_voice.clone());
    let audio = app_state.speech_client.speak(&request.text, &voice).await?;

    info!("synthesized {} bytes of speech", audio.len());
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}

/// Speech-to-text pass-through: first file field of the multipart upload is
/// forwarded opaque; only the transcript comes back.
pub async fn transcribe_handler(
    State(app_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<TranscribeResponse>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .into_api_error("Failed to read multipart upload")?
    {
        if field.name() == Some("file") || field.name() == Some("audio") {
            let file_name = field
                .file_name()
                .unwrap_or("recording.webm")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .into_api_error("Failed to read audio bytes")?;
            upload = Some((file_name, bytes.to_vec()));
            break;
        }
    }

    let (file_name, audio) =
        upload.ok_or_else(|| ApiError::bad_request("missing audio file field"))?;
    if audio.is_empty() {
        return Err(ApiError::bad_request("audio upload is empty"));
    }

    info!("transcribing {} byte upload {}", audio.len(), file_name);
    let transcript = app_state
        .speech_client
        .transcribe(file_name, audio)
        .await?;

    Ok(Json(TranscribeResponse { transcript }))
}
