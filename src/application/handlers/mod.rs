//! Application handlers.
//!
//! Command handlers that orchestrate provider calls and domain policy.

pub mod conversation;
pub mod extraction;

pub use conversation::{
    ContinueExchangeCommand, ContinueExchangeHandler, StartExchangeCommand, StartExchangeHandler,
};
pub use extraction::{ExtractUserInfoCommand, ExtractUserInfoHandler, ExtractUserInfoResult};
