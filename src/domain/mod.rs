//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors)
//! - `conversation` - Continuation tokens and exchange results for provider-held memory
//! - `extraction` - Extracted user records and the presence policy applied to them

pub mod conversation;
pub mod extraction;
pub mod foundation;
