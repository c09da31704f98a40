//! OpenAI Provider - Implementation of AIProvider for OpenAI's Responses API.
//!
//! Conversation state stays on OpenAI's side: every response has an `id`, and a
//! request naming it as `previous_response_id` is answered with the whole prior
//! exchange as context.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! # Structured output
//!
//! When the request carries an [`OutputSchema`](crate::ports::OutputSchema) it is
//! sent as `text.format` with type `json_schema`, and the output text is the
//! JSON document produced by the model.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::conversation::ContinuationToken;
use crate::ports::{
    AIProvider, MessageRole, ProviderError, ProviderInfo, ProviderResponse, ResponseRequest,
    TokenUsage,
};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Seconds to report when a rate limit response names no delay.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Responses API provider implementation.
///
/// Holds one HTTP client for the life of the process. No timeout or retry
/// policy is applied; failures are reported as they happen.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the responses endpoint URL.
    fn responses_url(&self) -> String {
        format!("{}/responses", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(request: &ResponseRequest) -> OpenAIRequest {
        let input = request
            .messages
            .iter()
            .map(|msg| OpenAIInputMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                },
                content: msg.content.clone(),
            })
            .collect();

        let text = request.output_schema.as_ref().map(|schema| TextConfig {
            format: JsonSchemaFormat {
                kind: "json_schema",
                name: schema.name.clone(),
                schema: schema.schema.clone(),
                strict: schema.strict,
            },
        });

        OpenAIRequest {
            model: request.model.clone(),
            input,
            previous_response_id: request
                .previous_token
                .as_ref()
                .map(|t| t.as_str().to_string()),
            temperature: request.temperature,
            text,
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &ResponseRequest) -> Result<Response, ProviderError> {
        let openai_request = Self::to_openai_request(request);

        self.client
            .post(self.responses_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::network(format!("Connection failed: {}", e))
                } else {
                    ProviderError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses onto provider errors.
    async fn handle_response_status(response: Response) -> Result<Response, ProviderError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_header = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        tracing::warn!(status = %status, "OpenAI returned error status");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::AuthenticationFailed)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::rate_limited(
                retry_header.unwrap_or_else(|| Self::parse_retry_after(&error_body)),
            )),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Err(ProviderError::invalid_request(
                Self::error_message(&error_body),
            )),
            s if s.is_server_error() => Err(ProviderError::unavailable(format!(
                "Server error {}: {}",
                s,
                Self::error_message(&error_body)
            ))),
            s => Err(ProviderError::network(format!(
                "Unexpected status {}: {}",
                s, error_body
            ))),
        }
    }

    /// Pulls `error.message` out of an error body, falling back to the raw body.
    fn error_message(error_body: &str) -> String {
        serde_json::from_str::<Value>(error_body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| error_body.to_string())
    }

    /// Parses retry-after from a rate limit message ("try again in 20s").
    fn parse_retry_after(error_body: &str) -> u32 {
        let message = Self::error_message(error_body);
        message
            .find("try again in ")
            .map(|idx| &message[idx + 13..])
            .and_then(|rest| {
                let end = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                rest[..end].parse::<u32>().ok()
            })
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
    }

    /// Parses a successful response body.
    async fn parse_response(response: Response) -> Result<ProviderResponse, ProviderError> {
        let response = Self::handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("Failed to parse response: {}", e)))?;

        Self::into_provider_response(openai_response)
    }

    /// Flattens the output items into a single text and validates the id.
    fn into_provider_response(
        openai_response: OpenAIResponse,
    ) -> Result<ProviderResponse, ProviderError> {
        let token = ContinuationToken::new(openai_response.id)
            .map_err(|e| ProviderError::parse(format!("Invalid response id: {}", e)))?;

        let mut output_text = String::new();
        let mut refusal = None;

        for item in openai_response.output {
            if let OutputItem::Message { content } = item {
                for part in content {
                    match part {
                        ContentPart::OutputText { text } => output_text.push_str(&text),
                        ContentPart::Refusal { refusal: reason } => refusal = Some(reason),
                        ContentPart::Other => {}
                    }
                }
            }
        }

        if output_text.is_empty() {
            if let Some(reason) = refusal {
                return Err(ProviderError::content_filtered(reason));
            }
        }

        let usage = openai_response
            .usage
            .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens))
            .unwrap_or_default();

        Ok(ProviderResponse::new(output_text, token, openai_response.model).with_usage(usage))
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn respond(&self, request: ResponseRequest) -> Result<ProviderResponse, ProviderError> {
        tracing::debug!(
            model = %request.model,
            continued = request.previous_token.is_some(),
            structured = request.output_schema.is_some(),
            "Sending OpenAI response request"
        );

        let response = self.send_request(&request).await?;
        let parsed = Self::parse_response(response).await?;

        tracing::debug!(
            token = %parsed.token,
            total_tokens = parsed.usage.total_tokens,
            "Received OpenAI response"
        );

        Ok(parsed)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai")
            .with_continuation(true)
            .with_structured_output(true)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    input: Vec<OpenAIInputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_response_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<TextConfig>,
}

#[derive(Debug, Serialize)]
struct OpenAIInputMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct TextConfig {
    format: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    schema: Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    id: String,
    model: String,
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText { text: String },
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    input_tokens: u32,
    output_tokens: u32,
}
