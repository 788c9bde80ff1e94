// src/llm/anthropic.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{env, time::Duration};
use tokio::time::sleep;
use tracing::warn;

use super::VendorError;
use crate::config::CONFIG;

const SERVICE: &str = "anthropic";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One turn in the wire format the messages API expects.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Client for the Anthropic messages API (chat completion).
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicClient {
    pub fn new() -> Result<Self> {
        let api_key = env::var("ANTHROPIC_API_KEY").context("ANTHROPIC_API_KEY not set")?;
        Ok(Self::with_key(api_key, CONFIG.anthropic_base_url.clone()))
    }

    /// Construct with an explicit key and base URL (tests, alternate hosts).
    pub fn with_key(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: CONFIG.anthropic_model.clone(),
            max_tokens: CONFIG.anthropic_max_tokens,
            temperature: CONFIG.chat_temperature,
        }
    }

    /// Send one chat exchange and return the reply text.
    ///
    /// Retries a bounded number of times on rate limiting; every other
    /// failure surfaces immediately.
    pub async fn create_message(
        &self,
        system: &str,
        messages: &[ChatTurn],
    ) -> Result<String, VendorError> {
        self.create_message_with(system, messages, None).await
    }

    /// Like [`create_message`](Self::create_message), with an optional
    /// temperature override for structured output (e.g., exercises).
    pub async fn create_message_with(
        &self,
        system: &str,
        messages: &[ChatTurn],
        temperature: Option<f32>,
    ) -> Result<String, VendorError> {
        let payload = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": temperature.unwrap_or(self.temperature),
            "system": system,
            "messages": messages,
        });

        let mut attempt = 0;
        let max_attempts = 3;

        loop {
            let response = self
                .client
                .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&payload)
                .send()
                .await
                .map_err(VendorError::transport(SERVICE))?;

            match response.status().as_u16() {
                200 => {
                    let body: MessageResponse = response
                        .json()
                        .await
                        .map_err(VendorError::transport(SERVICE))?;
                    return body
                        .content
                        .into_iter()
                        .find(|block| block.kind == "text")
                        .and_then(|block| block.text)
                        .ok_or(VendorError::EmptyResponse { service: SERVICE });
                }
                429 => {
                    attempt += 1;
                    if attempt >= max_attempts {
                        return Err(VendorError::from_response(SERVICE, response).await);
                    }
                    let wait_time = Duration::from_secs(2u64.pow(attempt));
                    warn!("anthropic rate limited, waiting {:?}", wait_time);
                    sleep(wait_time).await;
                }
                _ => return Err(VendorError::from_response(SERVICE, response).await),
            }
        }
    }
}
