//! AI provider configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::ai::DEFAULT_BASE_URL;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Model used for conversational exchanges
    #[serde(default = "default_conversation_model")]
    pub conversation_model: String,

    /// Model used for structured extraction
    #[serde(default = "default_extraction_model")]
    pub extraction_model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl AiConfig {
    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        if self.conversation_model.trim().is_empty() {
            return Err(ValidationError::EmptyModel("conversation_model"));
        }
        if self.extraction_model.trim().is_empty() {
            return Err(ValidationError::EmptyModel("extraction_model"));
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            conversation_model: default_conversation_model(),
            extraction_model: default_extraction_model(),
            base_url: default_base_url(),
        }
    }
}

fn default_conversation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_extraction_model() -> String {
    "gpt-4o".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AiConfig {
        AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.conversation_model, "gpt-4o-mini");
        assert_eq!(config.extraction_model, "gpt-4o");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(!config.has_openai());
    }

    #[test]
    fn test_validation_no_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        );
    }

    #[test]
    fn test_validation_blank_key() {
        let config = AiConfig {
            openai_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = AiConfig {
            base_url: "api.openai.com".to_string(),
            ..configured()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_validation_empty_model() {
        let config = AiConfig {
            extraction_model: String::new(),
            ..configured()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyModel("extraction_model"))
        );
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(configured().validate().is_ok());
    }
}
