//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM provider implementations (OpenAI, mock)

pub mod ai;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
