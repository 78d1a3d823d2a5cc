//! Scripted provider
//!
//! An `LlmProvider` that replays canned replies in order and records every
//! request it receives. Used for offline runs and throughout the tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::core::{
    error::LlmError,
    provider::{EventStream, LlmProvider},
    types::{
        ContentDelta, FinishReason, GenerateRequest, MessageMetadata, StreamEvent, UsageMetadata,
    },
};

/// One canned provider behaviour
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Stream the given text pieces, then finish normally
    Chunks(Vec<String>),
    /// Fail the request before any streaming starts
    Fail(String),
    /// Stream the text but never send the end of message
    Truncated(String),
    /// Emit an in-stream error event
    StreamError(String),
}

impl ScriptedReply {
    /// Whole reply as a single chunk
    pub fn text(text: impl Into<String>) -> Self {
        ScriptedReply::Chunks(vec![text.into()])
    }

    pub fn chunks(pieces: &[&str]) -> Self {
        ScriptedReply::Chunks(pieces.iter().map(|p| p.to_string()).collect())
    }
}

/// Provider that replays `ScriptedReply`s first-in first-out
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replies not consumed yet
    pub fn remaining(&self) -> usize {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

fn message_start() -> StreamEvent {
    StreamEvent::MessageStart {
        message: MessageMetadata {
            id: "scripted".to_string(),
            model: Some("scripted".to_string()),
        },
    }
}

fn text_deltas(pieces: Vec<String>) -> impl Iterator<Item = StreamEvent> {
    pieces.into_iter().map(|text| StreamEvent::ContentDelta {
        index: 0,
        delta: ContentDelta::TextDelta { text },
    })
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .ok_or_else(|| LlmError::InvalidRequest("no scripted replies left".to_string()))?;

        let events: Vec<StreamEvent> = match reply {
            ScriptedReply::Chunks(pieces) => {
                let output_tokens = pieces.len() as u32;
                std::iter::once(message_start())
                    .chain(text_deltas(pieces))
                    .chain(std::iter::once(StreamEvent::MessageEnd {
                        finish_reason: FinishReason::Stop,
                        usage: Some(UsageMetadata::new(0, output_tokens)),
                    }))
                    .collect()
            }
            ScriptedReply::Fail(reason) => {
                return Err(LlmError::HttpError {
                    status: 503,
                    body: reason,
                })
            }
            ScriptedReply::Truncated(text) => std::iter::once(message_start())
                .chain(text_deltas(vec![text]))
                .collect(),
            ScriptedReply::StreamError(error) => {
                vec![message_start(), StreamEvent::Error { error }]
            }
        };

        Ok(Box::pin(futures::stream::iter(
            events.into_iter().map(Ok::<StreamEvent, LlmError>),
        )))
    }
}
