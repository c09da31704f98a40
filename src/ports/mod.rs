//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AIProvider` - Hosted LLM request/response with server-held conversation state

mod ai_provider;

pub use ai_provider::{
    AIProvider, Message, MessageRole, OutputSchema, ProviderError, ProviderInfo,
    ProviderResponse, ResponseRequest, TokenUsage,
};
