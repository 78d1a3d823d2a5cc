//! Failures of a completion provider

use std::time::Duration;
use thiserror::Error;

/// What went wrong talking to the completion API
#[derive(Debug, Error)]
pub enum LlmError {
    /// The API refused the key (401/403)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Transport failure or an unexpected status; status 0 means no response
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// The event stream broke off or could not be read
    #[error("Stream error: {0}")]
    StreamError(String),

    /// A payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The API rejected the request body (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Too many requests (429)
    #[error("Rate limit exceeded (retry after {retry_after:?})")]
    RateLimitExceeded { retry_after: Option<Duration> },
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::HttpError {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}
