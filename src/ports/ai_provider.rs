//! AI Provider Port - Interface for hosted LLM integrations.
//!
//! This port abstracts a single request/response exchange with an LLM provider.
//! Conversation memory lives on the provider side: every response carries a
//! [`ContinuationToken`] and a request may name one as its predecessor.
//!
//! # Design
//!
//! - One call, one response; no streaming
//! - Optional JSON Schema constraint for structured output
//! - Failures are surfaced as [`ProviderError`] and never retried here
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn respond(&self, request: ResponseRequest) -> Result<ProviderResponse, ProviderError> {
//!         let text = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(ProviderResponse::new(text, ContinuationToken::new("resp_echo").unwrap(), request.model))
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::conversation::ContinuationToken;

/// Port for hosted LLM interactions.
///
/// Implementations connect to an external AI service and translate between
/// the provider-specific API and our domain types.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Send one request and wait for the complete response.
    async fn respond(&self, request: ResponseRequest) -> Result<ProviderResponse, ProviderError>;

    /// Get provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a single model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
    /// Input messages for this turn, in order.
    pub messages: Vec<Message>,
    /// Response to continue from. The provider supplies the earlier history.
    pub previous_token: Option<ContinuationToken>,
    /// Shape the output must conform to.
    pub output_schema: Option<OutputSchema>,
    /// Temperature for response randomness (0.0 = deterministic).
    pub temperature: Option<f32>,
}

impl ResponseRequest {
    /// Creates an empty request for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            previous_token: None,
            output_schema: None,
            temperature: None,
        }
    }

    /// Adds a message to the input.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    /// Continues from an earlier response.
    pub fn with_previous_token(mut self, token: ContinuationToken) -> Self {
        self.previous_token = Some(token);
        self
    }

    /// Constrains output to a JSON Schema.
    pub fn with_output_schema(mut self, schema: OutputSchema) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A message in the request input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions (guides model behavior).
    System,
    /// User input.
    User,
    /// Assistant (model) response.
    Assistant,
}

/// Named JSON Schema for structured output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSchema {
    /// Schema name reported to the provider.
    pub name: String,
    /// JSON Schema document.
    pub schema: Value,
    /// Whether the provider must follow the schema exactly.
    pub strict: bool,
}

impl OutputSchema {
    /// Creates a strict schema.
    pub fn strict(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
            strict: true,
        }
    }
}

/// Complete response from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// Generated text (JSON text when an output schema was requested).
    pub output_text: String,
    /// Token identifying this response, for follow-ups.
    pub token: ContinuationToken,
    /// Model that generated the response.
    pub model: String,
    /// Token usage, when reported.
    pub usage: TokenUsage,
}

impl ProviderResponse {
    /// Creates a response with zero usage.
    pub fn new(
        output_text: impl Into<String>,
        token: ContinuationToken,
        model: impl Into<String>,
    ) -> Self {
        Self {
            output_text: output_text.into(),
            token,
            model: model.into(),
            usage: TokenUsage::zero(),
        }
    }

    /// Sets the usage.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the input.
    pub input_tokens: u32,
    /// Tokens in the output.
    pub output_tokens: u32,
    /// Total tokens (input + output).
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage. The total saturates at `u32::MAX`.
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens.saturating_add(output_tokens),
        }
    }

    /// Creates zero usage.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Provider information and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai").
    pub name: String,
    /// Whether server-side continuation tokens are honoured.
    pub supports_continuation: bool,
    /// Whether JSON Schema constrained output is supported.
    pub supports_structured_output: bool,
}

impl ProviderInfo {
    /// Creates new provider info with every capability enabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_continuation: true,
            supports_structured_output: true,
        }
    }

    /// Sets continuation support.
    pub fn with_continuation(mut self, supports: bool) -> Self {
        self.supports_continuation = supports;
        self
    }

    /// Sets structured output support.
    pub fn with_structured_output(mut self, supports: bool) -> Self {
        self.supports_structured_output = supports;
        self
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the provider asked us to wait.
        retry_after_secs: u32,
    },

    /// Model refused to answer.
    #[error("content filtered: {reason}")]
    ContentFiltered {
        /// Refusal text from the model.
        reason: String,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Structured output did not decode into the expected shape.
    #[error("schema mismatch for '{schema}': {message}")]
    SchemaMismatch {
        /// Name of the expected schema.
        schema: String,
        /// Decoder error.
        message: String,
    },
}

impl ProviderError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a content filtered error.
    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates a schema mismatch error.
    pub fn schema_mismatch(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Returns true if structured output failed to decode.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }
}
