//! Conversation handlers - start an exchange, then continue it by token.
//!
//! Neither handler keeps history. The caller threads the returned
//! [`ContinuationToken`](crate::domain::conversation::ContinuationToken) into
//! the next call.

mod continue_exchange;
mod start_exchange;

pub use continue_exchange::{ContinueExchangeCommand, ContinueExchangeHandler};
pub use start_exchange::{StartExchangeCommand, StartExchangeHandler};

use crate::domain::conversation::{ContinuationToken, Exchange};
use crate::ports::{AIProvider, MessageRole, ProviderError, ResponseRequest};

/// Sends one user turn, optionally continuing from `previous`.
async fn send_turn(
    provider: &dyn AIProvider,
    model: &str,
    prompt: &str,
    previous: Option<ContinuationToken>,
) -> Result<Exchange, ProviderError> {
    if prompt.trim().is_empty() {
        return Err(ProviderError::invalid_request("prompt cannot be empty"));
    }

    let mut request = ResponseRequest::new(model).with_message(MessageRole::User, prompt);
    if let Some(token) = previous {
        request = request.with_previous_token(token);
    }

    let response = provider.respond(request).await?;

    if response.output_text.trim().is_empty() {
        return Err(ProviderError::parse("provider returned an empty answer"));
    }

    Ok(Exchange::new(response.output_text, response.token))
}
