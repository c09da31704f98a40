//! ExtractUserInfoHandler - Pull a UserRecord out of free text and summarize it
//!
//! The summary is always displayable text. Missing fields pick a degraded
//! sentence instead of failing; only provider and decoding failures are errors.

use std::sync::Arc;

use crate::domain::extraction::{
    PresenceOutcome, UserRecord, USER_RECORD_SCHEMA, USER_RECORD_SCHEMA_NAME,
};
use crate::ports::{AIProvider, MessageRole, OutputSchema, ProviderError, ResponseRequest};

/// System instructions sent with every extraction request.
pub const EXTRACTION_INSTRUCTIONS: &str = "Extract user information from the text.";

/// Command to extract user information from text
#[derive(Debug, Clone)]
pub struct ExtractUserInfoCommand {
    pub prompt: String,
}

impl ExtractUserInfoCommand {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Result of an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractUserInfoResult {
    /// Record as decoded from the provider.
    pub record: UserRecord,
    /// Presence classification of the record.
    pub outcome: PresenceOutcome,
}

impl ExtractUserInfoResult {
    /// Human-readable summary for display.
    pub fn summary(&self) -> String {
        self.outcome.to_string()
    }
}

/// Handler for structured user extraction
pub struct ExtractUserInfoHandler {
    provider: Arc<dyn AIProvider>,
    model: String,
}

impl ExtractUserInfoHandler {
    pub fn new(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: ExtractUserInfoCommand,
    ) -> Result<ExtractUserInfoResult, ProviderError> {
        if cmd.prompt.trim().is_empty() {
            return Err(ProviderError::invalid_request("prompt cannot be empty"));
        }

        let info = self.provider.provider_info();
        if !info.supports_structured_output {
            return Err(ProviderError::invalid_request(format!(
                "provider '{}' does not support structured output",
                info.name
            )));
        }

        // 1. Schema-constrained request
        let request = ResponseRequest::new(&self.model)
            .with_message(MessageRole::System, EXTRACTION_INSTRUCTIONS)
            .with_message(MessageRole::User, cmd.prompt)
            .with_output_schema(OutputSchema::strict(
                USER_RECORD_SCHEMA_NAME,
                (*USER_RECORD_SCHEMA).clone(),
            ))
            .with_temperature(0.0);

        let response = self.provider.respond(request).await?;

        // 2. Decode into the record shape
        let record = UserRecord::from_json(&response.output_text)
            .map_err(|e| ProviderError::schema_mismatch(USER_RECORD_SCHEMA_NAME, e.to_string()))?;

        // 3. Presence policy
        let outcome = PresenceOutcome::from_record(&record);
        match (&outcome, outcome.missing_field()) {
            (_, Some(field)) => {
                tracing::warn!(field = %field, "User {} not available, using fallback info", field)
            }
            (PresenceOutcome::Insufficient, None) => {
                tracing::warn!("Critical user info missing, cannot proceed")
            }
            _ => tracing::debug!(token = %response.token, "User info extracted"),
        }

        Ok(ExtractUserInfoResult { record, outcome })
    }
}
