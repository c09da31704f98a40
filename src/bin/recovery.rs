//! Recovery demo - extract user info and degrade gracefully when fields are missing.

use std::error::Error;
use std::sync::Arc;

use llm_building_blocks::adapters::{OpenAIConfig, OpenAIProvider};
use llm_building_blocks::application::{ExtractUserInfoCommand, ExtractUserInfoHandler};
use llm_building_blocks::config::{AppConfig, API_KEY_VAR};
use llm_building_blocks::telemetry::{init_tracing, DEFAULT_LOG_DIRECTIVE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing(DEFAULT_LOG_DIRECTIVE);
    let config = AppConfig::load_validated()?;

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or(API_KEY_VAR)?;
    let provider = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(api_key).with_base_url(&config.ai.base_url),
    )?);
    let handler = ExtractUserInfoHandler::new(provider, &config.ai.extraction_model);

    let result = match handler
        .handle(ExtractUserInfoCommand::new(
            "I am 38 and my email is john@example.com",
        ))
        .await
    {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(error = %err, "Recovery demo failed");
            return Err(err.into());
        }
    };

    println!("Recovery Output:");
    println!("{}", result.summary());

    Ok(())
}
