//! Text completion client
//!
//! Drives one provider call to the end of its stream and returns the
//! assembled text. A response is only returned once the provider has
//! signalled the end of the message; anything else is a `GenerationError`.

use futures::StreamExt;
use std::sync::Arc;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{ContentDelta, FinishReason, GenerateRequest, StreamEvent},
};

/// Errors from a single completion call
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The provider call or its stream failed
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The provider reported an error inside the stream
    #[error("Provider reported an error: {0}")]
    Provider(String),

    /// The stream ended before the message was complete
    #[error("Stream ended before the response was complete ({received} bytes received)")]
    Incomplete { received: usize },
}

/// Accumulates streamed responses into a single string
#[derive(Clone)]
pub struct TextCompletionClient {
    provider: Arc<dyn LlmProvider>,
}

impl TextCompletionClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Run a request to completion and return the full response text
    ///
    /// Text deltas are appended in arrival order, so the result equals what a
    /// non-streaming call would have returned.
    pub async fn complete(&self, request: GenerateRequest) -> Result<String, GenerationError> {
        let mut stream = self.provider.stream_generate(request).await?;

        let mut text = String::new();
        let mut finished = false;

        while let Some(event) = stream.next().await {
            match event? {
                StreamEvent::ContentDelta {
                    delta: ContentDelta::TextDelta { text: t },
                    ..
                } => text.push_str(&t),
                StreamEvent::MessageEnd {
                    finish_reason,
                    usage,
                } => {
                    if finish_reason == FinishReason::MaxTokens {
                        tracing::warn!(chars = text.len(), "completion truncated at max_tokens");
                    }
                    if let Some(usage) = usage {
                        tracing::debug!(
                            input_tokens = usage.input_tokens,
                            output_tokens = usage.output_tokens,
                            "completion finished"
                        );
                    }
                    finished = true;
                }
                StreamEvent::Error { error } => return Err(GenerationError::Provider(error)),
                StreamEvent::MessageStart { .. } | StreamEvent::MessageDelta { .. } => {}
            }
        }

        if !finished {
            return Err(GenerationError::Incomplete {
                received: text.len(),
            });
        }

        Ok(text)
    }
}
