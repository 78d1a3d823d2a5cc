#![allow(dead_code)]

use std::sync::Arc;

use adapt_ai::config::AppConfig;
use adapt_ai::llm::{ScriptedProvider, ScriptedReply};
use adapt_ai::state::{AppState, SharedState};

pub const TEST_SYSTEM_PROMPT: &str = "You are a patient tutor.";

/// Config with the built-in defaults and a fixed system prompt
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::new("test-key");
    config.system_prompt = TEST_SYSTEM_PROMPT.to_string();
    config
}

/// Application state driven by canned model replies
pub fn scripted_state(replies: Vec<ScriptedReply>) -> (Arc<ScriptedProvider>, SharedState) {
    let provider = Arc::new(ScriptedProvider::new(replies));
    let state = Arc::new(AppState::new(&test_config(), provider.clone()));
    (provider, state)
}

/// A JSON array literal of the given words
pub fn word_list_json(words: &[&str]) -> String {
    serde_json::to_string(words).unwrap()
}

pub const ANIMALS: [&str; 10] = [
    "cat", "dog", "lion", "tiger", "zebra", "bear", "wolf", "duck", "frog", "seal",
];
