//! Mapping between abstraction types and OpenAI-specific types

use crate::llm::core::types::{
    ContentDelta, FinishReason, GenerateRequest, Message, MessageMetadata, MessageRole,
    StreamEvent, UsageMetadata,
};

use super::types::{ChatCompletionRequest, ChatMessage, OpenAiStreamEvent};

/// Convert our abstraction request to OpenAI's request format
pub fn to_openai_request(request: GenerateRequest, default_model: &str) -> ChatCompletionRequest {
    let config = request.config;
    ChatCompletionRequest {
        model: config.model.unwrap_or_else(|| default_model.to_string()),
        messages: request.messages.into_iter().map(to_openai_message).collect(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        top_p: config.top_p,
        stop: config.stop_sequences,
        stream: true,
    }
}

fn to_openai_message(message: Message) -> ChatMessage {
    let role = match message.role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };

    ChatMessage {
        role: role.to_string(),
        content: message.content,
    }
}

/// Per-response bookkeeping carried across chunks
#[derive(Debug, Default)]
pub struct StreamState {
    started: bool,
    finished: bool,
    usage: Option<UsageMetadata>,
}

/// Convert an OpenAI stream event to our abstraction's StreamEvents
///
/// One chunk can yield several events: the first chunk also opens the
/// message, and a chunk can carry both content and a finish reason.
pub fn from_openai_event(event: OpenAiStreamEvent, state: &mut StreamState) -> Vec<StreamEvent> {
    match event {
        OpenAiStreamEvent::Chunk(chunk) => {
            let mut events = Vec::new();

            if !state.started {
                state.started = true;
                events.push(StreamEvent::MessageStart {
                    message: MessageMetadata {
                        id: chunk.id.clone(),
                        model: chunk.model.clone(),
                    },
                });
            }

            for choice in chunk.choices {
                if let Some(text) = choice.delta.content {
                    if !text.is_empty() {
                        events.push(StreamEvent::ContentDelta {
                            index: choice.index,
                            delta: ContentDelta::TextDelta { text },
                        });
                    }
                }

                if let Some(reason) = choice.finish_reason {
                    state.finished = true;
                    events.push(StreamEvent::MessageEnd {
                        finish_reason: FinishReason::from_provider(&reason),
                        usage: state.usage,
                    });
                }
            }

            if let Some(usage) = chunk.usage {
                let usage = UsageMetadata::new(usage.prompt_tokens, usage.completion_tokens);
                state.usage = Some(usage);
                events.push(StreamEvent::MessageDelta { usage: Some(usage) });
            }

            events
        }
        OpenAiStreamEvent::Done => {
            // Some compatible servers never send a finish_reason
            if state.finished {
                vec![]
            } else {
                state.finished = true;
                vec![StreamEvent::MessageEnd {
                    finish_reason: FinishReason::Stop,
                    usage: state.usage,
                }]
            }
        }
        OpenAiStreamEvent::Error(error) => {
            let kind = error
                .error_type
                .or(error.code)
                .unwrap_or_else(|| "error".to_string());
            vec![StreamEvent::Error {
                error: format!("{}: {}", kind, error.message),
            }]
        }
    }
}
