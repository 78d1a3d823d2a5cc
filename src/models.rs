// Request and response bodies

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::content::{Placement, WordSearch, DEFAULT_FLASHCARD_COUNT};
use crate::llm::Message;

/// Body-level validation failure, reported as 422
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField(pub String);

fn require_text(field: &str, value: &str) -> Result<(), InvalidField> {
    if value.trim().is_empty() {
        return Err(InvalidField(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordSearchRequest {
    pub topic: String,
}

impl WordSearchRequest {
    pub fn validate(&self) -> Result<(), InvalidField> {
        require_text("topic", &self.topic)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MindMapRequest {
    pub subject: String,
}

impl MindMapRequest {
    pub fn validate(&self) -> Result<(), InvalidField> {
        require_text("subject", &self.subject)
    }
}

fn default_flashcard_count() -> u32 {
    DEFAULT_FLASHCARD_COUNT
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlashcardRequest {
    pub subject: String,
    #[serde(default = "default_flashcard_count")]
    pub num_flashcards: u32,
}

impl FlashcardRequest {
    pub fn validate(&self) -> Result<(), InvalidField> {
        require_text("subject", &self.subject)?;
        if self.num_flashcards == 0 {
            return Err(InvalidField("num_flashcards must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub message: String,
    // Explicit nulls fall back to the defaults too
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl MessageRequest {
    pub fn validate(&self) -> Result<(), InvalidField> {
        require_text("message", &self.message)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSearchResponse {
    pub grid: Vec<Vec<String>>,
    pub answers: Vec<Placement>,
    /// Words that could not be placed
    pub dropped_words: usize,
}

impl From<WordSearch> for WordSearchResponse {
    fn from(search: WordSearch) -> Self {
        Self {
            grid: search.grid.to_rows(),
            answers: search.answers,
            dropped_words: search.dropped.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
