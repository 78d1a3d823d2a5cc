//! Service configuration read from the environment

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

use crate::assistant::DEFAULT_SYSTEM_PROMPT;
use crate::llm::openai::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer key for the completion API
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Model used for every request
    pub model: String,

    /// Listen address
    pub host: IpAddr,
    pub port: u16,

    /// Generate-and-decode cycles per generator
    pub word_list_max_attempts: u32,
    pub mind_map_max_attempts: u32,
    pub flashcards_max_attempts: u32,

    /// System message that opens every conversation
    pub system_prompt: String,
}

impl AppConfig {
    /// Defaults for everything but the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            word_list_max_attempts: 3,
            mind_map_max_attempts: 1,
            flashcards_max_attempts: 1,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Read the process environment
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;
        let mut config = Self::new(api_key.trim());

        if let Some(base_url) = get("OPENAI_BASE_URL") {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(model) = get("OPENAI_MODEL") {
            config.model = model.trim().to_string();
        }
        if let Some(host) = get("HOST") {
            config.host = parse_value("HOST", &host)?;
        }
        if let Some(port) = get("PORT") {
            config.port = parse_value("PORT", &port)?;
        }
        if let Some(value) = get("WORD_LIST_MAX_ATTEMPTS") {
            config.word_list_max_attempts = parse_attempts("WORD_LIST_MAX_ATTEMPTS", &value)?;
        }
        if let Some(value) = get("MIND_MAP_MAX_ATTEMPTS") {
            config.mind_map_max_attempts = parse_attempts("MIND_MAP_MAX_ATTEMPTS", &value)?;
        }
        if let Some(value) = get("FLASHCARDS_MAX_ATTEMPTS") {
            config.flashcards_max_attempts = parse_attempts("FLASHCARDS_MAX_ATTEMPTS", &value)?;
        }
        if let Some(prompt) = get("ASSISTANT_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_attempts(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    let attempts: u32 = parse_value(key, value)?;
    if attempts == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(attempts)
}
