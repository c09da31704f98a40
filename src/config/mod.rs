//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Optional overrides use the
//! `LLM_BLOCKS` prefix with double underscores separating nested values. The API
//! key is read from the conventional `OPENAI_API_KEY` variable.
//!
//! # Example
//!
//! ```no_run
//! use llm_building_blocks::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Conversation model: {}", config.ai.conversation_model);
//! ```

mod ai;
mod error;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Variable holding the provider API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LLM_BLOCKS` prefix
    /// 3. Maps `OPENAI_API_KEY` onto `ai.openai_api_key`
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LLM_BLOCKS__AI__CONVERSATION_MODEL=gpt-4o` -> `ai.conversation_model = gpt-4o`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        Self::from_env()
    }

    /// Build configuration from the process environment only, without reading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LLM_BLOCKS")
                    .separator("__"),
            )
            .set_override_option("ai.openai_api_key", std::env::var(API_KEY_VAR).ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()
    }

    /// Validate, logging the failure before returning it.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if let Err(e) = self.validate() {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
        Ok(self)
    }

    /// Load and validate in one step. Failures are logged before they are returned.
    pub fn load_validated() -> Result<Self, ConfigError> {
        Self::load()
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load configuration");
                e
            })?
            .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::test_support::CapturedLogs;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var(API_KEY_VAR);
        env::remove_var("LLM_BLOCKS__AI__CONVERSATION_MODEL");
        env::remove_var("LLM_BLOCKS__AI__BASE_URL");
    }

    #[test]
    fn test_load_api_key_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_VAR, "sk-test");
        let result = AppConfig::from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_VAR, "sk-test");
        let result = AppConfig::from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.conversation_model, "gpt-4o-mini");
        assert_eq!(config.ai.extraction_model, "gpt-4o");
    }

    #[test]
    fn test_prefixed_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_VAR, "sk-test");
        env::set_var("LLM_BLOCKS__AI__CONVERSATION_MODEL", "gpt-4.1-mini");
        env::set_var("LLM_BLOCKS__AI__BASE_URL", "http://localhost:8089/v1");
        let result = AppConfig::from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.conversation_model, "gpt-4.1-mini");
        assert_eq!(config.ai.base_url, "http://localhost:8089/v1");
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let logs = CapturedLogs::default();
        let result = {
            let _log_guard = logs.install();
            AppConfig::from_env().unwrap().validated()
        };

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ValidationError::MissingRequired(
                "OPENAI_API_KEY"
            )))
        ));
        let output = logs.contents();
        assert!(output.contains("ERROR"), "no error event in: {output}");
        assert!(output.contains("Invalid configuration"));
    }

    #[test]
    fn test_validated_passes_through_valid_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_VAR, "sk-test");
        let result = AppConfig::from_env();
        clear_env();

        let config = result.unwrap().validated().unwrap();
        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-test"));
    }
}
