//! Conversation module - Provider-held conversational memory.
//!
//! The provider keeps the exchange history server-side. Locally we only
//! hold the opaque [`ContinuationToken`] it hands back with each answer,
//! and thread it into the next request.

mod exchange;
mod token;

pub use exchange::Exchange;
pub use token::ContinuationToken;
