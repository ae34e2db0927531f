//! OpenAI-compatible Provider Implementation
//!
//! Talks to any endpoint that speaks the chat-completions protocol.
//!
//! # Behavior
//!
//! - One POST per call, no retries
//! - No timeout of its own; pass a configured `reqwest::Client` or wrap the
//!   call in `tokio::time::timeout`
//! - A top-level `error.message` in the body is a provider failure even when
//!   the HTTP status is 200
//!
//! # Examples
//!
//! ```no_run
//! use chrono_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::default_endpoint(Some("sk-...".to_string()));
//! ```

use crate::{ClientError, CompletionProvider, ExtractionRequest};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Chat-completions API provider
pub struct OpenAiProvider {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// Response envelope from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: full URL of the chat-completions route
    /// - `api_key`: sent as a bearer token when present
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider for the public OpenAI endpoint
    pub fn default_endpoint(api_key: Option<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, api_key)
    }

    /// Endpoint this provider posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one request and return the first choice's content
    ///
    /// # Errors
    ///
    /// - `Network` if the request cannot be sent or the body cannot be read
    /// - `Provider` if the body carries `error.message`, or the status is
    ///   not a success
    /// - `EmptyResponse` on a successful status with an empty body
    /// - `MalformedEnvelope` if the body is not a completion envelope
    pub async fn send(&self, request: &ExtractionRequest) -> Result<String, ClientError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        debug!("Provider responded with HTTP {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to read body: {}", e)))?;

        debug!("Provider response body: {}", String::from_utf8_lossy(&body));

        interpret_response(status, &body)
    }
}

impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &ExtractionRequest) -> Result<String, ClientError> {
        self.send(request).await
    }
}

/// Turn a status and raw body into completion text or a client error
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<String, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        if status.is_success() {
            return Err(ClientError::EmptyResponse);
        }
        return Err(ClientError::Provider(format!("HTTP {}", status)));
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Provider(format!("HTTP {}", status)));
        }
        Err(e) => return Err(ClientError::MalformedEnvelope(e.to_string())),
    };

    if let Some(message) = provider_error_message(&value) {
        warn!("Provider reported an error: {}", message);
        return Err(ClientError::Provider(message.to_string()));
    }

    if !status.is_success() {
        return Err(ClientError::Provider(format!("HTTP {}", status)));
    }

    let envelope: ChatCompletionResponse = serde_json::from_value(value)
        .map_err(|e| ClientError::MalformedEnvelope(e.to_string()))?;

    envelope
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::MalformedEnvelope("no choices in response".to_string()))?
        .message
        .content
        .ok_or_else(|| ClientError::MalformedEnvelope("first choice has no content".to_string()))
}

fn provider_error_message(value: &Value) -> Option<&str> {
    value.get("error")?.get("message")?.as_str()
}
