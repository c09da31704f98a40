//! Memory demo - the provider remembers earlier turns through a continuation token.
//!
//! Asks for a joke, then asks two follow-ups, each continuing from the
//! previous response.

use std::error::Error;
use std::sync::Arc;

use llm_building_blocks::adapters::{OpenAIConfig, OpenAIProvider};
use llm_building_blocks::application::{
    ContinueExchangeCommand, ContinueExchangeHandler, StartExchangeCommand, StartExchangeHandler,
};
use llm_building_blocks::config::{AppConfig, API_KEY_VAR};
use llm_building_blocks::ports::AIProvider;
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
    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(api_key).with_base_url(&config.ai.base_url),
    )?);

    let start = StartExchangeHandler::new(provider.clone(), &config.ai.conversation_model);
    let follow_up = ContinueExchangeHandler::new(provider, &config.ai.conversation_model);

    if let Err(err) = run(&start, &follow_up).await {
        tracing::error!(error = %err, "Memory demo failed");
        return Err(err);
    }

    Ok(())
}

async fn run(
    start: &StartExchangeHandler,
    follow_up: &ContinueExchangeHandler,
) -> Result<(), Box<dyn Error>> {
    let joke = start
        .handle(StartExchangeCommand::new("Tell me a joke about programming"))
        .await?;
    println!("{}\n", joke.answer);

    let explanation = follow_up
        .handle(ContinueExchangeCommand::new("Explain why this funny?", joke.token))
        .await?;
    println!("{}", explanation.answer);

    let recall = follow_up
        .handle(ContinueExchangeCommand::new(
            "What was my previous question?",
            explanation.token,
        ))
        .await?;
    println!("{}", recall.answer);

    Ok(())
}
