// src/api/http/image.rs

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Art style from the front-end's style picker; "none" means unstyled.
    pub style: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    /// Base64-encoded PNG, passed through from the vendor untouched.
    pub image: String,
}

/// Compose the mood text with the chosen art style, the way the Mood Into
/// Art front-end always did: "<mood> in <style> style".
fn image_prompt(prompt: &str, style: Option<&str>) -> String {
    match style {
        Some(style) if !style.is_empty() && style != "none" => {
            format!("{} in {} style", prompt, style)
        }
        _ => prompt.to_string(),
    }
}

pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("prompt must not be empty"));
    }

    let prompt = image_prompt(request.prompt.trim(), request.style.as_deref());
    info!("generating image for prompt of {} chars", prompt.len());

    let image = app_state.image_client.generate(&prompt).await?;
    Ok(Json(GenerateResponse { image }))
}
