//! Extraction module - Structured user data pulled from free text.
//!
//! The provider fills a [`UserRecord`] against a strict JSON schema. What we
//! show afterwards depends on which fields actually came back, decided by
//! [`PresenceOutcome::from_record`].

mod presence;
mod user_record;

pub use presence::{MissingField, PresenceOutcome, INSUFFICIENT_INFORMATION};
pub use user_record::{UserRecord, USER_RECORD_SCHEMA, USER_RECORD_SCHEMA_NAME};
