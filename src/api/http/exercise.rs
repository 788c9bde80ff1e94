// src/api/http/exercise.rs

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::llm::ChatTurn;
use crate::state::AppState;

/// Exercises come back in a fixed template, so generation runs cooler than
/// conversation.
const EXERCISE_TEMPERATURE: f32 = 0.3;

const EXERCISE_SYSTEM_PROMPT: &str = "You are ROY, an expert in creating \
practical exercises for personal growth. Your exercises are structured, \
actionable, and tailored to specific challenges.";

#[derive(Deserialize)]
pub struct ExerciseRequest {
    pub stressor: String,
}

#[derive(Serialize)]
pub struct ExerciseResponse {
    pub exercise: String,
}

/// Builds the structured-exercise instruction for one stressor. The template
/// is fixed; only the stressor varies.
fn exercise_prompt(stressor: &str) -> String {
    format!(
        "Generate a structured exercise for a user struggling with {stressor}.\n\
         \n\
         The exercise should follow this format:\n\
         \n\
         EXERCISE: [Name of Exercise]\n\
         \n\
         PURPOSE: [Clear statement of the specific intended outcome]\n\
         \n\
         TIME: [Estimated completion time in minutes]\n\
         \n\
         STEPS:\n\
         1. [First step]\n\
         2. [Second step]\n\
         3. [Third step]\n\
         ...\n\
         \n\
         EXAMPLE:\n\
         [Concrete example of how to complete the exercise]\n\
         \n\
         REFLECTION:\n\
         - [First reflection question]\n\
         - [Second reflection question]\n\
         - [Third reflection question]\n\
         \n\
         NEXT STEP:\n\
         [Description of how ROY will follow up on this exercise]\n\
         \n\
         Make the exercise practical, actionable, and appropriate for \
         someone experiencing {stressor}."
    )
}

/// Generate a structured growth exercise for a single stressor. Stateless:
/// exercises do not touch the session store.
pub async fn exercise_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ExerciseRequest>,
) -> ApiResult<Json<ExerciseResponse>> {
    let stressor = request.stressor.trim();
    if stressor.is_empty() {
        return Err(ApiError::bad_request("stressor must not be empty"));
    }

    info!("generating exercise for stressor: {}", stressor);

    let messages = [ChatTurn {
        role: "user".to_string(),
        content: exercise_prompt(stressor),
    }];
    let exercise = app_state
        .chat_client
        .create_message_with(EXERCISE_SYSTEM_PROMPT, &messages, Some(EXERCISE_TEMPERATURE))
        .await?;

    Ok(Json(ExerciseResponse { exercise }))
}
