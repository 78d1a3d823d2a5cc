//! Word-search generation: ask the model for a word list, then build the grid

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use super::decoder::{generate_structured, json_kind, Decoder, RetryPolicy};
use super::error::{FormatError, GeneratorError};
use super::grid::{build_word_search, WordSearch};
use super::repair::Repair;
use crate::llm::{GenerateRequest, GenerationConfig, TextCompletionClient};

/// Words requested per puzzle
pub const WORD_COUNT: usize = 10;

const WORD_LIST_DECODER: Decoder = Decoder::new(Repair::GENERAL);

pub fn word_list_prompt(topic: &str) -> String {
    format!(
        "Return exactly {count} short words related to the topic '{topic}', in JSON format \
         and without any additional text. Write the words in the same language as the topic. \
         The response must be in this format:\n\
         [\"word1\", \"word2\", \"word3\", ...]",
        count = WORD_COUNT,
        topic = topic
    )
}

/// Trim, uppercase and keep only uppercase letters
///
/// Scripts without case (kana, CJK) have no uppercase form and are removed,
/// so a word written only in them is rejected.
pub fn normalize_word(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_uppercase())
        .collect()
}

/// Accept exactly `WORD_COUNT` strings, each non-empty once normalized
pub fn decode_word_list(raw: &str) -> Result<Vec<String>, FormatError> {
    let Value::Array(items) = WORD_LIST_DECODER.parse(raw)? else {
        return Err(FormatError::Shape("expected a JSON array of words".to_string()));
    };

    if items.len() != WORD_COUNT {
        return Err(FormatError::Shape(format!(
            "expected {} words, got {}",
            WORD_COUNT,
            items.len()
        )));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let Value::String(word) = item else {
                return Err(FormatError::Shape(format!(
                    "entry {} is {}, not a string",
                    i,
                    json_kind(item)
                )));
            };
            let word = normalize_word(word);
            if word.is_empty() {
                return Err(FormatError::Shape(format!("entry {} has no letters", i)));
            }
            Ok(word)
        })
        .collect()
}

/// Builds word-search puzzles for a topic
#[derive(Clone)]
pub struct WordSearchGenerator {
    client: TextCompletionClient,
    config: GenerationConfig,
    policy: RetryPolicy,
    seed: Option<u64>,
}

impl WordSearchGenerator {
    pub fn new(client: TextCompletionClient, policy: RetryPolicy) -> Self {
        Self {
            client,
            config: GenerationConfig::new(512).with_temperature(0.5).with_top_p(1.0),
            policy,
            seed: None,
        }
    }

    /// Make grid placement reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Ask the model for the topic's word list
    pub async fn word_list(&self, topic: &str) -> Result<Vec<String>, GeneratorError> {
        let request = GenerateRequest::prompt(word_list_prompt(topic), self.config.clone());
        generate_structured(&self.client, &request, self.policy, decode_word_list).await
    }

    /// Generate a complete puzzle
    ///
    /// Words that do not fit after the allowed trials are left out of the
    /// answers and listed in `WordSearch::dropped`.
    pub async fn generate(&self, topic: &str) -> Result<WordSearch, GeneratorError> {
        let words = self.word_list(topic).await?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let search = build_word_search(&words, rng);

        tracing::info!(
            topic,
            placed = search.answers.len(),
            dropped = search.dropped.len(),
            "word search generated"
        );
        Ok(search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIMALS: &str = r#"["leão", "tigre", "zebra", "urso", "lobo", "gato", "cão", "pato", "sapo", "foca"]"#;

    #[test]
    fn test_prompt_mentions_topic_and_count() {
        let prompt = word_list_prompt("Animais");
        assert!(prompt.contains("'Animais'"));
        assert!(prompt.contains("exactly 10"));
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  leão "), "LEÃO");
        assert_eq!(normalize_word("sistema solar"), "SISTEMASOLAR");
        assert_eq!(normalize_word("anti-virus"), "ANTIVIRUS");
        assert_eq!(normalize_word(" 42 "), "");
        assert_eq!(normalize_word("ねこ"), "");
        assert_eq!(normalize_word("猫cat"), "CAT");
        assert_eq!(normalize_word("straße"), "STRASSE");
    }

    #[test]
    fn test_decode_rejects_caseless_words() {
        let raw = r#"["ねこ", "いぬ", "とり", "さかな", "うま", "うし", "ぶた", "さる", "くま", "しか"]"#;
        match decode_word_list(raw) {
            Err(FormatError::Shape(msg)) => assert!(msg.contains("entry 0")),
            other => panic!("Expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_ten_words() {
        let words = decode_word_list(ANIMALS).unwrap();
        assert_eq!(words.len(), WORD_COUNT);
        assert_eq!(words[0], "LEÃO");
        assert_eq!(words[6], "CÃO");
    }

    #[test]
    fn test_decode_fenced_list() {
        let raw = format!("```json\n{}\n```", ANIMALS);
        assert_eq!(decode_word_list(&raw).unwrap().len(), WORD_COUNT);
    }

    #[test]
    fn test_decode_rejects_wrong_count() {
        let raw = r#"["a", "b", "c"]"#;
        assert!(matches!(decode_word_list(raw), Err(FormatError::Shape(_))));
    }

    #[test]
    fn test_decode_rejects_non_strings() {
        let raw = r#"["a", "b", "c", "d", "e", "f", "g", "h", "i", 10]"#;
        match decode_word_list(raw) {
            Err(FormatError::Shape(msg)) => assert!(msg.contains("entry 9")),
            other => panic!("Expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_object() {
        assert!(matches!(
            decode_word_list(r#"{"words": []}"#),
            Err(FormatError::Shape(_))
        ));
    }
}
