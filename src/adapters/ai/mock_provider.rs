//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests and offline demos to run without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses, each issued with a fresh continuation token
//! - Error injection for failure-path testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Why do programmers prefer dark mode?")
//!     .with_response("Because light attracts bugs.");
//!
//! let response = provider.respond(request).await?;
//! assert_eq!(response.output_text, "Why do programmers prefer dark mode?");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::conversation::ContinuationToken;
use crate::ports::{
    AIProvider, ProviderError, ProviderInfo, ProviderResponse, ResponseRequest, TokenUsage,
};

/// Mock AI provider for testing.
///
/// Configurable to return specific responses or inject errors.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<ResponseRequest>>>,
    /// Tokens issued so far, in order.
    issued: Arc<Mutex<Vec<ContinuationToken>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response with this output text.
    Success { output_text: String, usage: TokenUsage },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate a model refusal.
    ContentFiltered { reason: String },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate transport failure.
    Network { message: String },
    /// Simulate an unknown previous response id.
    InvalidRequest { message: String },
}

impl From<MockError> for ProviderError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                ProviderError::rate_limited(retry_after_secs)
            }
            MockError::ContentFiltered { reason } => ProviderError::content_filtered(reason),
            MockError::Unavailable { message } => ProviderError::unavailable(message),
            MockError::AuthenticationFailed => ProviderError::AuthenticationFailed,
            MockError::Network { message } => ProviderError::network(message),
            MockError::InvalidRequest { message } => ProviderError::invalid_request(message),
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock"),
            calls: Arc::new(Mutex::new(Vec::new())),
            issued: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, output_text: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            output_text: output_text.into(),
            usage: TokenUsage::new(10, 20),
        })
    }

    /// Adds a structured response, serialized as JSON output text.
    pub fn with_json_response(self, value: serde_json::Value) -> Self {
        self.with_response(value.to_string())
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets the provider info.
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<ResponseRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns every token issued so far.
    pub fn issued_tokens(&self) -> Vec<ContinuationToken> {
        self.issued.lock().unwrap().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Gets the next response or a default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                output_text: "Mock response".to_string(),
                usage: TokenUsage::new(5, 10),
            })
    }

    /// Issues a fresh token shaped like a provider response id.
    fn issue_token(&self) -> Result<ContinuationToken, ProviderError> {
        let token = ContinuationToken::new(format!("resp_mock_{}", Uuid::new_v4().simple()))
            .map_err(|e| ProviderError::parse(e.to_string()))?;
        self.issued.lock().unwrap().push(token.clone());
        Ok(token)
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn respond(&self, request: ResponseRequest) -> Result<ProviderResponse, ProviderError> {
        let model = request.model.clone();
        self.calls.lock().unwrap().push(request);

        match self.next_response() {
            MockResponse::Success { output_text, usage } => {
                let token = self.issue_token()?;
                Ok(ProviderResponse::new(output_text, token, model).with_usage(usage))
            }
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
