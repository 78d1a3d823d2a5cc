//! OpenAI provider implementation
//!
//! This module provides a client for OpenAI-compatible `/chat/completions`
//! endpoints, consumed as a server-sent event stream.

pub mod client;
pub mod mapper;
pub mod sse;
pub mod types;

// Re-export commonly used types
pub use client::{OpenAiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
