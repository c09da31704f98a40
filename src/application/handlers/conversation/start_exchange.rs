//! StartExchangeHandler - Open a new provider-held conversation

use std::sync::Arc;

use crate::domain::conversation::Exchange;
use crate::ports::{AIProvider, ProviderError};

use super::send_turn;

/// Command to start a new exchange
#[derive(Debug, Clone)]
pub struct StartExchangeCommand {
    pub prompt: String,
}

impl StartExchangeCommand {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Handler for the first turn of a conversation
pub struct StartExchangeHandler {
    provider: Arc<dyn AIProvider>,
    model: String,
}

impl StartExchangeHandler {
    pub fn new(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub async fn handle(&self, cmd: StartExchangeCommand) -> Result<Exchange, ProviderError> {
        let exchange = send_turn(self.provider.as_ref(), &self.model, &cmd.prompt, None).await?;

        tracing::info!(model = %self.model, token = %exchange.token, "Exchange started");

        Ok(exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::{Message, MessageRole};

    #[tokio::test]
    async fn test_start_exchange_returns_answer_and_token() {
        let provider = Arc::new(MockAIProvider::new().with_response("A joke about semicolons"));
        let handler = StartExchangeHandler::new(provider.clone(), "gpt-4o-mini");

        let exchange = handler
            .handle(StartExchangeCommand::new("Tell me a joke about programming"))
            .await
            .unwrap();

        assert_eq!(exchange.answer, "A joke about semicolons");
        assert!(!exchange.token.as_str().is_empty());

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-4o-mini");
        assert_eq!(
            calls[0].messages,
            vec![Message::new(MessageRole::User, "Tell me a joke about programming")]
        );
        assert!(calls[0].previous_token.is_none());
    }

    #[tokio::test]
    async fn test_start_exchange_rejects_blank_prompt_without_calling_provider() {
        let provider = Arc::new(MockAIProvider::new());
        let handler = StartExchangeHandler::new(provider.clone(), "gpt-4o-mini");

        let result = handler.handle(StartExchangeCommand::new("   ")).await;

        assert!(matches!(result, Err(ProviderError::InvalidRequest(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_start_exchange_empty_answer_is_parse_error() {
        let provider = Arc::new(MockAIProvider::new().with_response(""));
        let handler = StartExchangeHandler::new(provider, "gpt-4o-mini");

        let result = handler.handle(StartExchangeCommand::new("Hello")).await;

        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[tokio::test]
    async fn test_start_exchange_propagates_provider_error() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::AuthenticationFailed));
        let handler = StartExchangeHandler::new(provider, "gpt-4o-mini");

        let result = handler.handle(StartExchangeCommand::new("Hello")).await;

        assert!(matches!(result, Err(ProviderError::AuthenticationFailed)));
    }
}
