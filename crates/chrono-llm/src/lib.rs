//! Chrono LLM Provider Layer
//!
//! Completion providers for the schedule extraction pipeline.
//!
//! # Architecture
//!
//! Every provider implements [`CompletionProvider`]: one request in, the raw
//! completion text out. Providers make exactly one outbound call per
//! invocation. Retries, timeouts and cancellation belong to the caller.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: Chat-completions HTTP API
//!
//! # Examples
//!
//! ```
//! use chrono_llm::{ChatMessage, CompletionProvider, ExtractionRequest, MockProvider};
//!
//! # async fn example() -> Result<(), chrono_llm::ClientError> {
//! let provider = MockProvider::new(r#"{"items": []}"#);
//! let request = ExtractionRequest {
//!     model: "gpt-3.5-turbo".to_string(),
//!     messages: vec![ChatMessage::user("nothing planned")],
//!     temperature: 0.2,
//! };
//! let completion = provider.complete(&request).await?;
//! assert_eq!(completion, r#"{"items": []}"#);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;
pub mod request;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::OpenAiProvider;
pub use request::{ChatMessage, ExtractionRequest, Role};

/// Errors that can occur while talking to a completion provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transport failure (DNS, connect, TLS, reading the body)
    #[error("Network error: {0}")]
    Network(String),

    /// The provider reported an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Successful status with no body
    #[error("Empty response from provider")]
    EmptyResponse,

    /// Body could not be read as a completion envelope
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),
}

/// A text-completion backend
///
/// Implementations perform a single exchange per call and return the first
/// choice's content untouched.
pub trait CompletionProvider {
    /// Send the request and return the raw completion text
    fn complete(
        &self,
        request: &ExtractionRequest,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured completions without making any network calls.
/// Specific replies are keyed by the request's user content.
///
/// # Examples
///
/// ```
/// use chrono_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("lunch at noon", r#"{"items": []}"#);
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, ClientError>>>>,
    requests: Arc<Mutex<Vec<ExtractionRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed completion for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific completion for a given user content
    pub fn add_response(&mut self, user_content: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(user_content.into(), Ok(response.into()));
    }

    /// Configure an error for a given user content
    pub fn add_error(&mut self, user_content: impl Into<String>, error: ClientError) {
        lock(&self.responses).insert(user_content.into(), Err(error));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// The most recent request received
    pub fn last_request(&self) -> Option<ExtractionRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        lock(&self.requests).clear();
    }

    fn reply_for(&self, request: &ExtractionRequest) -> Result<String, ClientError> {
        lock(&self.requests).push(request.clone());

        let responses = lock(&self.responses);
        match request.user_content().and_then(|content| responses.get(content)) {
            Some(reply) => reply.clone(),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"items": []}"#)
    }
}

impl CompletionProvider for MockProvider {
    async fn complete(&self, request: &ExtractionRequest) -> Result<String, ClientError> {
        self.reply_for(request)
    }
}

// A panicking test must not poison the mock for the rest of the suite
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user: &str) -> ExtractionRequest {
        ExtractionRequest {
            model: "test-model".to_string(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user(user)],
            temperature: 0.2,
        }
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete(&request("anything")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::new("fallback");
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete(&request("hello")).await.unwrap(), "world");
        assert_eq!(provider.complete(&request("foo")).await.unwrap(), "bar");
        assert_eq!(provider.complete(&request("unknown")).await.unwrap(), "fallback");
    }

    #[tokio::test]
    async fn test_mock_provider_records_requests() {
        let provider = MockProvider::default();
        assert_eq!(provider.call_count(), 0);

        provider.complete(&request("first")).await.unwrap();
        provider.complete(&request("second")).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(
            provider.last_request().unwrap().user_content(),
            Some("second")
        );

        provider.reset();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad", ClientError::Provider("rate limited".to_string()));

        let result = provider.complete(&request("bad")).await;
        assert_eq!(result, Err(ClientError::Provider("rate limited".to_string())));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete(&request("x")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_client_error_display() {
        assert_eq!(
            ClientError::Provider("rate limited".to_string()).to_string(),
            "Provider error: rate limited"
        );
        assert_eq!(ClientError::EmptyResponse.to_string(), "Empty response from provider");
    }
}
