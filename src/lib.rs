//! LLM Building Blocks - Conversation memory and resilient extraction
//!
//! This crate implements two small patterns over a hosted LLM API: threading a
//! provider-issued continuation token through sequential calls, and extracting
//! a structured user record with a presence-based fallback summary.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
