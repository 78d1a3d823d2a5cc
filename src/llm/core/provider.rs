//! Seam between the completion client and a concrete API

use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

use super::{error::LlmError, types::{GenerateRequest, StreamEvent}};

/// Pinned, boxed stream of provider events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;

/// A chat-completion backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Start a streamed completion for `request`
    ///
    /// An `Err` means the request never got going; failures after that
    /// arrive as items of the returned stream.
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError>;
}
