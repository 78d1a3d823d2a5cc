//! Server-Sent Events (SSE) parser for OpenAI chat completion streams

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use crate::llm::core::error::LlmError;

use super::types::{OpenAiStreamEvent, OpenAiStreamPayload};

/// Raw byte stream as returned by `reqwest::Response::bytes_stream`
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Parse a stream of bytes as OpenAI SSE events
///
/// OpenAI's SSE format is a sequence of `data:` events terminated by a
/// `[DONE]` sentinel:
/// ```text
/// data: {"id":"chatcmpl-1","choices":[{"index":0,"delta":{"content":"Hi"}}]}
///
/// data: [DONE]
/// ```
///
/// Bytes are buffered until a full event (blank-line delimited) is available,
/// and only complete events are decoded as UTF-8, so a multi-byte character
/// split across two network chunks is reassembled before decoding.
pub fn parse_sse_stream(
    byte_stream: ByteStream,
) -> Pin<Box<dyn Stream<Item = Result<OpenAiStreamEvent, LlmError>> + Send>> {
    let mut buffer: Vec<u8> = Vec::new();

    let event_stream = byte_stream.flat_map(move |chunk_result| {
        let chunk = match chunk_result {
            Ok(bytes) => bytes,
            Err(e) => {
                return futures::stream::iter(vec![Err(LlmError::StreamError(e.to_string()))]);
            }
        };

        buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(event_end) = find_event_boundary(&buffer) {
            let raw_event: Vec<u8> = buffer.drain(..event_end + 2).collect();
            let event_text = match std::str::from_utf8(&raw_event[..event_end]) {
                Ok(text) => text,
                Err(e) => {
                    events.push(Err(LlmError::StreamError(format!(
                        "Invalid UTF-8 in stream: {}",
                        e
                    ))));
                    continue;
                }
            };

            if let Some(parsed_event) = parse_event(event_text) {
                events.push(parsed_event);
            }
        }

        futures::stream::iter(events)
    });

    Box::pin(event_stream)
}

fn find_event_boundary(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|window| window == b"\n\n")
}

/// Parse a single SSE event from its text representation
fn parse_event(event_text: &str) -> Option<Result<OpenAiStreamEvent, LlmError>> {
    let mut data_lines: Vec<&str> = Vec::new();

    for line in event_text.lines() {
        // Comment lines (": keep-alive") and other fields are ignored
        if let Some(data_val) = line.strip_prefix("data:") {
            data_lines.push(data_val.trim());
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    let data = data_lines.join("\n");
    if data.is_empty() {
        return None;
    }

    if data == "[DONE]" {
        return Some(Ok(OpenAiStreamEvent::Done));
    }

    match serde_json::from_str::<OpenAiStreamPayload>(&data) {
        Ok(OpenAiStreamPayload::Chunk(chunk)) => Some(Ok(OpenAiStreamEvent::Chunk(chunk))),
        Ok(OpenAiStreamPayload::Error { error }) => Some(Ok(OpenAiStreamEvent::Error(error))),
        Err(e) => Some(Err(LlmError::SerializationError(format!(
            "Failed to parse OpenAI SSE event: {}. Data: {}",
            e, data
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn byte_stream(chunks: Vec<&'static [u8]>) -> ByteStream {
        Box::pin(stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok::<Bytes, reqwest::Error>(Bytes::from_static(c))),
        ))
    }

    #[tokio::test]
    async fn test_parse_content_chunk() {
        let data: &[u8] = b"data: {\"id\":\"chatcmpl-1\",\"object\":\"chat.completion.chunk\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hello\"},\"finish_reason\":null}]}\n\n";
        let mut sse_stream = parse_sse_stream(byte_stream(vec![data]));

        match sse_stream.next().await.unwrap().unwrap() {
            OpenAiStreamEvent::Chunk(chunk) => {
                assert_eq!(chunk.id, "chatcmpl-1");
                assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hello"));
            }
            other => panic!("Expected chunk, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_done_sentinel() {
        let mut sse_stream = parse_sse_stream(byte_stream(vec![&b"data: [DONE]\n\n"[..]]));

        assert!(matches!(
            sse_stream.next().await.unwrap().unwrap(),
            OpenAiStreamEvent::Done
        ));
        assert!(sse_stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_parse_chunked_event() {
        let chunk1: &[u8] = b"data: {\"id\":\"c\",\"choices\":[{\"index\":0,\"del";
        let chunk2: &[u8] = b"ta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n\n";
        let mut sse_stream = parse_sse_stream(byte_stream(vec![chunk1, chunk2]));

        match sse_stream.next().await.unwrap().unwrap() {
            OpenAiStreamEvent::Chunk(chunk) => {
                assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hi"));
            }
            other => panic!("Expected chunk, got {:?}", other),
        }
        assert!(matches!(
            sse_stream.next().await.unwrap().unwrap(),
            OpenAiStreamEvent::Done
        ));
    }

    #[tokio::test]
    async fn test_multibyte_character_split_across_chunks() {
        // "é" is 0xC3 0xA9; split it between two network reads
        let chunk1: &[u8] = b"data: {\"id\":\"c\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"caf\xC3";
        let chunk2: &[u8] = b"\xA9\"}}]}\n\n";
        let mut sse_stream = parse_sse_stream(byte_stream(vec![chunk1, chunk2]));

        match sse_stream.next().await.unwrap().unwrap() {
            OpenAiStreamEvent::Chunk(chunk) => {
                assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("café"));
            }
            other => panic!("Expected chunk, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_crlf_delimited_events() {
        let data: &[u8] = b"data: {\"id\":\"c\",\"choices\":[]}\r\n\r\ndata: [DONE]\r\n\r\n";
        let mut sse_stream = parse_sse_stream(byte_stream(vec![data]));

        assert!(matches!(
            sse_stream.next().await.unwrap().unwrap(),
            OpenAiStreamEvent::Chunk(_)
        ));
        assert!(matches!(
            sse_stream.next().await.unwrap().unwrap(),
            OpenAiStreamEvent::Done
        ));
    }

    #[tokio::test]
    async fn test_comment_lines_are_skipped() {
        let data: &[u8] = b": keep-alive\n\ndata: [DONE]\n\n";
        let mut sse_stream = parse_sse_stream(byte_stream(vec![data]));

        assert!(matches!(
            sse_stream.next().await.unwrap().unwrap(),
            OpenAiStreamEvent::Done
        ));
    }

    #[tokio::test]
    async fn test_parse_error_payload() {
        let data: &[u8] = b"data: {\"error\":{\"message\":\"overloaded\",\"type\":\"server_error\"}}\n\n";
        let mut sse_stream = parse_sse_stream(byte_stream(vec![data]));

        match sse_stream.next().await.unwrap().unwrap() {
            OpenAiStreamEvent::Error(error) => assert_eq!(error.message, "overloaded"),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_invalid_json() {
        let mut sse_stream = parse_sse_stream(byte_stream(vec![&b"data: {invalid json}\n\n"[..]]));

        assert!(sse_stream.next().await.unwrap().is_err());
    }
}
