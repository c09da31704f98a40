//! ContinueExchangeHandler - Follow up on an earlier response by its token

use std::sync::Arc;

use crate::domain::conversation::{ContinuationToken, Exchange};
use crate::ports::{AIProvider, ProviderError};

use super::send_turn;

/// Command to continue an existing exchange
#[derive(Debug, Clone)]
pub struct ContinueExchangeCommand {
    pub prompt: String,
    pub token: ContinuationToken,
}

impl ContinueExchangeCommand {
    pub fn new(prompt: impl Into<String>, token: ContinuationToken) -> Self {
        Self {
            prompt: prompt.into(),
            token,
        }
    }
}

/// Handler for follow-up turns
///
/// The provider rebuilds the history from the token. Reusing a token starts
/// an independent branch from that point.
pub struct ContinueExchangeHandler {
    provider: Arc<dyn AIProvider>,
    model: String,
}

impl ContinueExchangeHandler {
    pub fn new(provider: Arc<dyn AIProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub async fn handle(&self, cmd: ContinueExchangeCommand) -> Result<Exchange, ProviderError> {
        let info = self.provider.provider_info();
        if !info.supports_continuation {
            return Err(ProviderError::invalid_request(format!(
                "provider '{}' does not support continuation tokens",
                info.name
            )));
        }

        let previous = cmd.token.clone();
        let exchange = send_turn(
            self.provider.as_ref(),
            &self.model,
            &cmd.prompt,
            Some(cmd.token),
        )
        .await?;

        tracing::info!(
            model = %self.model,
            previous = %previous,
            token = %exchange.token,
            "Exchange continued"
        );

        Ok(exchange)
    }
}
