//! Mind-map generation

use serde_json::{Map, Value};

use super::decoder::{generate_structured, require_keys, Decoder, RetryPolicy};
use super::error::{FormatError, GeneratorError};
use super::repair::Repair;
use crate::llm::{GenerateRequest, GenerationConfig, TextCompletionClient};

const MIND_MAP_DECODER: Decoder = Decoder::new(Repair::GENERAL);

pub fn mind_map_prompt(subject: &str) -> String {
    let template = r#"Create a mind map for the subject '{subject}' in the following JSON format. It should include nodes and edges. Each node should have fields 'id', 'label', 'type', and 'parent'. The 'type' should be 'general_subject' for the main topic, 'category' for high-level branches, and 'sub_category' for subtopics under each category. Each edge should connect a source node to a target node.
Example format:

{
  "general_subject": "{subject}",
  "nodes": [
    {"id": "1", "label": "{subject}", "type": "general_subject"},
    {"id": "2", "label": "Category 1", "type": "category", "parent": "1"},
    {"id": "3", "label": "Subcategory 1", "type": "sub_category", "parent": "2"}
  ],
  "edges": [
    {"source": "1", "target": "2"},
    {"source": "2", "target": "3"}
  ]
}
Please use this format and only output valid JSON. Don't write anything after"#;

    template.replace("{subject}", subject)
}

/// Object with `nodes` and `edges`; `general_subject` defaults to `subject`
pub fn decode_mind_map(raw: &str, subject: &str) -> Result<Map<String, Value>, FormatError> {
    let mut map = require_keys(MIND_MAP_DECODER.parse(raw)?, &["nodes", "edges"])?;
    map.entry("general_subject")
        .or_insert_with(|| Value::String(subject.to_string()));
    Ok(map)
}

/// Builds mind maps for a subject
#[derive(Clone)]
pub struct MindMapGenerator {
    client: TextCompletionClient,
    config: GenerationConfig,
    policy: RetryPolicy,
}

impl MindMapGenerator {
    pub fn new(client: TextCompletionClient, policy: RetryPolicy) -> Self {
        Self {
            client,
            config: GenerationConfig::new(1512).with_temperature(0.5).with_top_p(1.0),
            policy,
        }
    }

    pub async fn generate(&self, subject: &str) -> Result<Map<String, Value>, GeneratorError> {
        let request = GenerateRequest::prompt(mind_map_prompt(subject), self.config.clone());
        let map = generate_structured(&self.client, &request, self.policy, |raw| {
            decode_mind_map(raw, subject)
        })
        .await?;

        tracing::info!(subject, "mind map generated");
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_substitutes_subject() {
        let prompt = mind_map_prompt("Photosynthesis");
        assert!(prompt.contains("'Photosynthesis'"));
        assert!(prompt.contains("\"label\": \"Photosynthesis\""));
        assert!(!prompt.contains("{subject}"));
    }

    #[test]
    fn test_decode_complete_map() {
        let raw = r#"{"general_subject": "Cells", "nodes": [{"id": "1", "label": "Cells", "type": "general_subject"}], "edges": []}"#;
        let map = decode_mind_map(raw, "Cells").unwrap();
        assert_eq!(map["general_subject"], json!("Cells"));
        assert_eq!(map["nodes"][0]["id"], json!("1"));
    }

    #[test]
    fn test_decode_keeps_string_ids() {
        let raw = r#"{"nodes": [{"id": "2"}], "edges": [{"source": "1", "target": "2"}]}"#;
        let map = decode_mind_map(raw, "Cells").unwrap();
        assert_eq!(map["nodes"][0]["id"], json!("2"));
        assert_eq!(map["general_subject"], json!("Cells"));
    }

    #[test]
    fn test_decode_requires_edges() {
        let raw = r#"{"general_subject": "Cells", "nodes": []}"#;
        assert!(matches!(
            decode_mind_map(raw, "Cells"),
            Err(FormatError::Shape(_))
        ));
    }

    #[test]
    fn test_decode_rejects_prose() {
        assert!(matches!(
            decode_mind_map("Sorry, I can't do that.", "Cells"),
            Err(FormatError::Parse(_))
        ));
    }
}
