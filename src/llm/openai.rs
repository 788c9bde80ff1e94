// src/llm/openai.rs

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::env;

use super::VendorError;
use crate::config::CONFIG;

const SERVICE: &str = "openai";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for OpenAI speech endpoints: text-to-speech and transcription.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        Ok(Self::with_key(api_key, CONFIG.openai_base_url.clone()))
    }

    /// Construct with an explicit key and base URL (tests, alternate hosts).
    pub fn with_key(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Synthesize speech for `text`. Returns encoded audio bytes (mp3); the
    /// caller streams them through untouched.
    pub async fn speak(&self, text: &str, voice: &str) -> Result<Vec<u8>, VendorError> {
        let payload = json!({
            "model": CONFIG.tts_model,
            "voice": voice,
            "input": text,
        });

        let response = self
            .client
            .post(self.endpoint("audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(VendorError::transport(SERVICE))?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(SERVICE, response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(VendorError::transport(SERVICE))?;
        Ok(bytes.to_vec())
    }

    /// Transcribe uploaded audio. The bytes pass through opaque; only the
    /// transcript text comes back.
    pub async fn transcribe(
        &self,
        file_name: String,
        audio: Vec<u8>,
    ) -> Result<String, VendorError> {
        let form = Form::new()
            .part("file", Part::bytes(audio).file_name(file_name))
            .text("model", CONFIG.stt_model.clone());

        let response = self
            .client
            .post(self.endpoint("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(VendorError::transport(SERVICE))?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(SERVICE, response).await);
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(VendorError::transport(SERVICE))?;
        Ok(body.text)
    }
}
