//! Structured-response decoding
//!
//! Turns raw model text into validated JSON: repair, parse, then a
//! generator-specific shape check. `generate_structured` wraps that in a
//! regenerate-and-retry loop bounded by a `RetryPolicy`.

use serde_json::Value;

use super::error::{FormatError, GeneratorError};
use super::repair::{apply_all, Repair};
use crate::llm::{GenerateRequest, TextCompletionClient};

/// How many generate-and-decode cycles a generator may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// A policy allowing `max_attempts` cycles (at least one)
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Generate once, never retry
    pub fn single() -> Self {
        Self::new(1)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single()
    }
}

/// Repairs and parses raw model text
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    repairs: &'static [Repair],
}

impl Decoder {
    pub const fn new(repairs: &'static [Repair]) -> Self {
        Self { repairs }
    }

    /// Apply the repair pass and parse the result as JSON
    pub fn parse(&self, raw: &str) -> Result<Value, FormatError> {
        let repaired = apply_all(raw, self.repairs);
        if repaired.trim().is_empty() {
            return Err(FormatError::Parse("empty output".to_string()));
        }
        Ok(serde_json::from_str(&repaired)?)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Repair::GENERAL)
    }
}

/// Require `value` to be an object carrying every key in `keys`
pub fn require_keys(
    value: Value,
    keys: &[&str],
) -> Result<serde_json::Map<String, Value>, FormatError> {
    let Value::Object(map) = value else {
        return Err(FormatError::Shape(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    };

    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| !map.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(FormatError::Shape(format!(
            "missing required key(s): {}",
            missing.join(", ")
        )));
    }

    Ok(map)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Generate and decode until `decode` accepts the output or the policy runs out
///
/// A `FormatError` uses up one attempt. A `GenerationError` ends the loop at
/// once; failures of the completion service are not retried here.
pub async fn generate_structured<T, F>(
    client: &TextCompletionClient,
    request: &GenerateRequest,
    policy: RetryPolicy,
    mut decode: F,
) -> Result<T, GeneratorError>
where
    F: FnMut(&str) -> Result<T, FormatError>,
{
    let mut last_error = FormatError::Parse("no attempt made".to_string());

    for attempt in 1..=policy.max_attempts() {
        let raw = client.complete(request.clone()).await?;

        match decode(&raw) {
            Ok(decoded) => {
                tracing::debug!(attempt, "model output accepted");
                return Ok(decoded);
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    error = %e,
                    "discarding unusable model output"
                );
                last_error = e;
            }
        }
    }

    Err(GeneratorError::Exhausted {
        attempts: policy.max_attempts(),
        last: last_error,
    })
}
