//! LLM Abstraction Layer
//!
//! This module provides a provider-neutral interface for streaming chat
//! completions, an OpenAI-compatible provider, and the completion client that
//! turns a provider stream into a single string.

pub mod completion;
pub mod core;
pub mod openai;
pub mod scripted;

// Re-export commonly used types
pub use self::core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{
        ContentDelta, FinishReason, GenerateRequest, Message, MessageRole, StreamEvent,
        UsageMetadata,
    },
};

pub use completion::{GenerationError, TextCompletionClient};
pub use openai::OpenAiClient;
pub use scripted::{ScriptedProvider, ScriptedReply};
