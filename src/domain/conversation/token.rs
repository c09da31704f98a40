//! Opaque continuation token issued by the provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Identifier of a provider response, used to continue the exchange from it.
///
/// Tokens have no structure we rely on. Supplying the same token to two
/// follow-up requests branches the conversation at that point; nothing here
/// prevents it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Creates a token, rejecting empty or whitespace-bearing values.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ValidationError::empty_field("continuation_token"));
        }
        if token.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "continuation_token",
                "contains whitespace",
            ));
        }
        Ok(Self(token))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContinuationToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContinuationToken {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContinuationToken> for String {
    fn from(token: ContinuationToken) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_provider_style_id() {
        let token = ContinuationToken::new("resp_67ccd2bed1ec8190b14f964abc054267").unwrap();
        assert_eq!(token.as_str(), "resp_67ccd2bed1ec8190b14f964abc054267");
        assert_eq!(token.to_string(), "resp_67ccd2bed1ec8190b14f964abc054267");
    }

    #[test]
    fn rejects_empty_token() {
        assert_eq!(
            ContinuationToken::new(""),
            Err(ValidationError::empty_field("continuation_token"))
        );
    }

    #[test]
    fn rejects_whitespace() {
        assert!(matches!(
            ContinuationToken::new("resp 123"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn serializes_as_plain_string() {
        let token: ContinuationToken = "resp_abc".parse().unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"resp_abc\"");

        let back: ContinuationToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }

    #[test]
    fn deserializing_empty_string_fails() {
        let result: Result<ContinuationToken, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
