//! OpenAI-specific request and response types
//!
//! These types map directly to the `/chat/completions` streaming schema.

use serde::{Deserialize, Serialize};

/// Request body for a streamed chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages, system message first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Nucleus sampling threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Always true, responses are consumed as SSE
    pub stream: bool,
}

/// A single chat message on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    pub content: String,
}

/// One `data:` payload of the stream
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenAiStreamPayload {
    /// Error reported inside the stream
    Error { error: OpenAiErrorData },
    /// Regular completion chunk
    Chunk(ChatCompletionChunk),
}

/// Parsed SSE event
#[derive(Debug, Clone)]
pub enum OpenAiStreamEvent {
    /// A completion chunk
    Chunk(ChatCompletionChunk),
    /// The `[DONE]` sentinel
    Done,
    /// An error payload
    Error(OpenAiErrorData),
}

/// Streamed completion chunk
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    /// Completion ID, shared by every chunk of a response
    #[serde(default)]
    pub id: String,
    /// Model that produced the chunk
    #[serde(default)]
    pub model: Option<String>,
    /// Choice deltas (empty on the trailing usage chunk)
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    /// Usage, only present when requested and only on the last chunk
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

/// A choice inside a chunk
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub delta: ChunkDelta,
    /// Set on the final chunk of this choice
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message content
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage as reported by OpenAI
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Error object, both in streams and in non-2xx bodies
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorData {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Hi".to_string(),
            }],
            temperature: Some(0.5),
            max_tokens: 512,
            top_p: None,
            stop: None,
            stream: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["stream"], true);
        assert!(json.get("top_p").is_none());
        assert!(json.get("stop").is_none());
    }

    #[test]
    fn test_payload_chunk() {
        let data = r#"{"id":"chatcmpl-1","object":"chat.completion.chunk","model":"gpt-3.5-turbo","choices":[{"index":0,"delta":{"content":"Hi"},"finish_reason":null}]}"#;
        match serde_json::from_str::<OpenAiStreamPayload>(data).unwrap() {
            OpenAiStreamPayload::Chunk(chunk) => {
                assert_eq!(chunk.id, "chatcmpl-1");
                assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hi"));
                assert!(chunk.choices[0].finish_reason.is_none());
            }
            _ => panic!("Expected chunk payload"),
        }
    }

    #[test]
    fn test_payload_error() {
        let data = r#"{"error":{"message":"The server had an error","type":"server_error","code":null}}"#;
        match serde_json::from_str::<OpenAiStreamPayload>(data).unwrap() {
            OpenAiStreamPayload::Error { error } => {
                assert_eq!(error.message, "The server had an error");
                assert_eq!(error.error_type.as_deref(), Some("server_error"));
            }
            _ => panic!("Expected error payload"),
        }
    }
}
