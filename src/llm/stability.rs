// src/llm/stability.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::env;

use super::VendorError;
use crate::config::CONFIG;

const SERVICE: &str = "stability";

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    base64: String,
}

/// Client for the Stability AI text-to-image endpoint.
#[derive(Clone)]
pub struct StabilityClient {
    client: Client,
    api_key: String,
    base_url: String,
    engine: String,
}

impl StabilityClient {
    pub fn new() -> Result<Self> {
        let api_key = env::var("STABILITY_API_KEY").context("STABILITY_API_KEY not set")?;
        Ok(Self::with_key(api_key, CONFIG.stability_base_url.clone()))
    }

    /// Construct with an explicit key and base URL (tests, alternate hosts).
    pub fn with_key(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            engine: CONFIG.stability_engine.clone(),
        }
    }

    /// Generate one image for `prompt`. Returns the base64-encoded PNG as the
    /// vendor produced it; the caller never decodes it.
    pub async fn generate(&self, prompt: &str) -> Result<String, VendorError> {
        let payload = json!({
            "text_prompts": [{ "text": prompt }],
            "cfg_scale": 7,
            "width": 1024,
            "height": 1024,
            "samples": 1,
        });

        let response = self
            .client
            .post(format!(
                "{}/v1/generation/{}/text-to-image",
                self.base_url.trim_end_matches('/'),
                self.engine
            ))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(VendorError::transport(SERVICE))?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(SERVICE, response).await);
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(VendorError::transport(SERVICE))?;
        body.artifacts
            .into_iter()
            .next()
            .map(|artifact| artifact.base64)
            .ok_or(VendorError::EmptyResponse { service: SERVICE })
    }
}
