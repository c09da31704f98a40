//! Result of one conversational call.

use super::ContinuationToken;

/// The provider's answer together with the token that continues from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Generated answer text.
    pub answer: String,
    /// Token to pass to the next follow-up.
    pub token: ContinuationToken,
}

impl Exchange {
    /// Creates a new exchange result.
    pub fn new(answer: impl Into<String>, token: ContinuationToken) -> Self {
        Self {
            answer: answer.into(),
            token,
        }
    }
}
