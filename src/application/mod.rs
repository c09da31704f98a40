//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Conversation handlers
    ContinueExchangeCommand, ContinueExchangeHandler,
    StartExchangeCommand, StartExchangeHandler,
    // Extraction handlers
    ExtractUserInfoCommand, ExtractUserInfoHandler, ExtractUserInfoResult,
};
