//! Flashcard generation

use serde_json::{Map, Value};

use super::decoder::{generate_structured, json_kind, Decoder, RetryPolicy};
use super::error::{FormatError, GeneratorError};
use super::repair::Repair;
use crate::llm::{GenerateRequest, GenerationConfig, TextCompletionClient};

/// Default number of cards per request
pub const DEFAULT_FLASHCARD_COUNT: u32 = 5;

// Ids are requested as bare numbers, so quoted ids are repaired too
const FLASHCARD_DECODER: Decoder = Decoder::new(&[
    Repair::StripCodeFence,
    Repair::UnquoteNumericIds,
    Repair::ExtractJsonSpan,
    Repair::StripTrailingCommas,
]);

pub fn flashcards_prompt(subject: &str, count: u32) -> String {
    format!(
        r#"Create {count} flashcards for the subject '{subject}' in JSON format, without introductions or additional explanations. The answer must be in exactly this format, with a list of flashcards, each containing: 'id' (a number without quotes), 'front', 'back', 'category', 'difficulty', 'tags', and 'image'. The JSON must start directly without any introduction:

{{
  "general_subject": "{subject}",
  "flashcards": [
    {{
      "id": 1,
      "front": "Flashcard question",
      "back": "Flashcard answer",
      "category": "Category",
      "difficulty": "Difficulty level",
      "tags": ["tag1", "tag2"],
      "image": "[Insert the URL of a relevant image here]"
    }},
    {{...}}
  ]
}}"#
    )
}

/// `{general_subject, flashcards}`, wrapping a bare card array when needed
pub fn decode_flashcards(raw: &str, subject: &str) -> Result<Map<String, Value>, FormatError> {
    let mut map = match FLASHCARD_DECODER.parse(raw)? {
        Value::Array(cards) => {
            let mut map = Map::new();
            map.insert("flashcards".to_string(), Value::Array(cards));
            map
        }
        Value::Object(map) => map,
        other => {
            return Err(FormatError::Shape(format!(
                "expected flashcards, got {}",
                json_kind(&other)
            )))
        }
    };

    if !map.contains_key("flashcards") {
        return Err(FormatError::Shape("missing required key(s): flashcards".to_string()));
    }
    map.entry("general_subject")
        .or_insert_with(|| Value::String(subject.to_string()));

    Ok(map)
}

/// Builds flashcard sets for a subject
#[derive(Clone)]
pub struct FlashcardGenerator {
    client: TextCompletionClient,
    config: GenerationConfig,
    policy: RetryPolicy,
}

impl FlashcardGenerator {
    pub fn new(client: TextCompletionClient, policy: RetryPolicy) -> Self {
        Self {
            client,
            config: GenerationConfig::new(2000).with_temperature(0.5).with_top_p(1.0),
            policy,
        }
    }

    pub async fn generate(
        &self,
        subject: &str,
        count: u32,
    ) -> Result<Map<String, Value>, GeneratorError> {
        let request =
            GenerateRequest::prompt(flashcards_prompt(subject, count), self.config.clone());
        let map = generate_structured(&self.client, &request, self.policy, |raw| {
            decode_flashcards(raw, subject)
        })
        .await?;

        let cards = map
            .get("flashcards")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        tracing::info!(subject, requested = count, cards, "flashcards generated");
        Ok(map)
    }
}
