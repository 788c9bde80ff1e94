// src/llm/mod.rs
//! Thin HTTP clients for the third-party AI services ROY proxies to.
//!
//! These are deliberately dumb pass-throughs: the session tracker never
//! depends on their success, and no store lock is ever held across a call.

mod anthropic;
mod openai;
mod stability;

pub use anthropic::{AnthropicClient, ChatTurn};
pub use openai::OpenAIClient;
pub use stability::StabilityClient;

/// Failure talking to a vendor API. The session store stays consistent
/// regardless; callers surface these as gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    #[error("{service} returned {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("request to {service} failed")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} response missing expected content")]
    EmptyResponse { service: &'static str },
}

impl VendorError {
    pub(crate) fn transport(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| VendorError::Transport { service, source }
    }

    pub(crate) async fn from_response(
        service: &'static str,
        response: reqwest::Response,
    ) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unreadable error body".to_string());
        VendorError::Api {
            service,
            status,
            body,
        }
    }
}
