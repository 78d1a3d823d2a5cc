//! Shared application state handed to every handler

use std::sync::Arc;

use crate::assistant::EducationalAssistant;
use crate::config::AppConfig;
use crate::content::{FlashcardGenerator, MindMapGenerator, RetryPolicy, WordSearchGenerator};
use crate::llm::{LlmError, LlmProvider, OpenAiClient, TextCompletionClient};

pub struct AppState {
    pub word_search: WordSearchGenerator,
    pub mind_map: MindMapGenerator,
    pub flashcards: FlashcardGenerator,
    pub assistant: EducationalAssistant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire every component to the given provider
    pub fn new(config: &AppConfig, provider: Arc<dyn LlmProvider>) -> Self {
        let client = TextCompletionClient::new(provider);

        Self {
            word_search: WordSearchGenerator::new(
                client.clone(),
                RetryPolicy::new(config.word_list_max_attempts),
            ),
            mind_map: MindMapGenerator::new(
                client.clone(),
                RetryPolicy::new(config.mind_map_max_attempts),
            ),
            flashcards: FlashcardGenerator::new(
                client.clone(),
                RetryPolicy::new(config.flashcards_max_attempts),
            ),
            assistant: EducationalAssistant::new(client, config.system_prompt.clone()),
        }
    }

    /// State backed by the configured OpenAI-compatible endpoint
    pub fn from_config(config: &AppConfig) -> Result<SharedState, LlmError> {
        let provider = OpenAiClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
        )?;
        Ok(Arc::new(Self::new(config, Arc::new(provider))))
    }
}
