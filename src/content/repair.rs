//! Text repairs applied to model output before JSON parsing
//!
//! Each repair is a pure string transform that leaves valid JSON untouched.
//! Generators pick the set that fits the shape they asked for.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""id"\s*:\s*"?(\d+)"?(\s*[,}\]\n])"#).expect("numeric id pattern is valid")
});

/// A known malformation and its fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// Remove a markdown code fence around the payload
    StripCodeFence,
    /// Keep only the first balanced JSON object or array
    ExtractJsonSpan,
    /// `"id": 1",` and `"id": "1"` become `"id": 1`
    UnquoteNumericIds,
    /// Drop commas directly before `}` or `]`
    StripTrailingCommas,
}

impl Repair {
    /// Repairs that are safe for any payload
    pub const GENERAL: &'static [Repair] = &[
        Repair::StripCodeFence,
        Repair::ExtractJsonSpan,
        Repair::StripTrailingCommas,
    ];

    pub fn apply(self, text: &str) -> String {
        match self {
            Repair::StripCodeFence => strip_code_fence(text),
            Repair::ExtractJsonSpan => extract_json_span(text),
            Repair::UnquoteNumericIds => unquote_numeric_ids(text),
            Repair::StripTrailingCommas => strip_trailing_commas(text),
        }
    }
}

/// Apply `repairs` in order
pub fn apply_all(text: &str, repairs: &[Repair]) -> String {
    repairs
        .iter()
        .fold(text.to_string(), |acc, repair| repair.apply(&acc))
}

fn strip_code_fence(text: &str) -> String {
    // A raw newline cannot occur inside a JSON string, so a fence opening a
    // line is never part of the payload
    let Some(open) = fence_at_line_start(text) else {
        return text.to_string();
    };

    let after_open = &text[open + 3..];
    let line_end = after_open.find('\n').unwrap_or(after_open.len());
    let is_language_tag = after_open[..line_end]
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let body = if is_language_tag {
        after_open.get(line_end + 1..).unwrap_or("")
    } else {
        // Payload starts on the fence line ("```[1]")
        after_open
    };

    let body = match fence_at_line_start(body) {
        Some(close) => &body[..close],
        None => body,
    };
    let body = body.trim();
    body.strip_suffix("```").unwrap_or(body).trim_end().to_string()
}

/// Byte offset of the first "```" that begins a line, ignoring indentation
fn fence_at_line_start(text: &str) -> Option<usize> {
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        let content = line.trim_start();
        if content.starts_with("```") {
            return Some(line_start + line.len() - content.len());
        }
        line_start += line.len();
    }
    None
}

fn extract_json_span(text: &str) -> String {
    let Some(start) = text.find(['{', '[']) else {
        return text.to_string();
    };

    let mut closers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => closers.push('}'),
            '[' => closers.push(']'),
            '}' | ']' => {
                closers.pop();
                if closers.is_empty() {
                    return text[start..start + offset + 1].to_string();
                }
            }
            _ => {}
        }
    }

    // Unbalanced: hand the parser everything from the opener on
    text[start..].trim_end().to_string()
}

fn unquote_numeric_ids(text: &str) -> String {
    NUMERIC_ID.replace_all(text, r#""id": ${1}${2}"#).into_owned()
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }

        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_json_is_untouched() {
        let json = r#"{"general_subject": "Cells", "nodes": [{"id": "1"}], "edges": []}"#;
        assert_eq!(apply_all(json, Repair::GENERAL), json);
    }

    #[test]
    fn test_strip_code_fence_with_language_tag() {
        let raw = "```json\n[\"SOL\", \"LUA\"]\n```";
        assert_eq!(Repair::StripCodeFence.apply(raw), "[\"SOL\", \"LUA\"]");
    }

    #[test]
    fn test_strip_code_fence_after_prose() {
        let raw = "Here is the list:\n```\n[1, 2]\n```\nEnjoy!";
        assert_eq!(Repair::StripCodeFence.apply(raw), "[1, 2]");
    }

    #[test]
    fn test_strip_code_fence_without_fence() {
        assert_eq!(Repair::StripCodeFence.apply("[1]"), "[1]");
    }

    #[test]
    fn test_backticks_inside_strings_are_untouched() {
        let json = r#"{"general_subject":"Markdown","flashcards":[{"id":1,"front":"What does ``` start?","back":"A code block"}]}"#;
        assert_eq!(Repair::StripCodeFence.apply(json), json);
        assert_eq!(apply_all(json, Repair::GENERAL), json);

        let words = r#"["```", "a"]"#;
        assert_eq!(apply_all(words, Repair::GENERAL), words);
    }

    #[test]
    fn test_strip_code_fence_payload_on_fence_line() {
        assert_eq!(Repair::StripCodeFence.apply("```[1]\n```"), "[1]");
        assert_eq!(Repair::StripCodeFence.apply("```[1, 2]```"), "[1, 2]");
    }

    #[test]
    fn test_strip_code_fence_keeps_backticks_in_fenced_payload() {
        let raw = "```json\n{\"front\": \"Use ``` for code\"}\n```";
        assert_eq!(
            Repair::StripCodeFence.apply(raw),
            "{\"front\": \"Use ``` for code\"}"
        );
    }

    #[test]
    fn test_extract_span_drops_surrounding_prose() {
        let raw = "Sure! {\"a\": [1, 2]} Let me know if you need more.";
        assert_eq!(Repair::ExtractJsonSpan.apply(raw), "{\"a\": [1, 2]}");
    }

    #[test]
    fn test_extract_span_ignores_brackets_inside_strings() {
        let raw = "Result: [\"A ] tricky\", \"B \\\" [quote\"] trailing";
        assert_eq!(
            Repair::ExtractJsonSpan.apply(raw),
            "[\"A ] tricky\", \"B \\\" [quote\"]"
        );
    }

    #[test]
    fn test_extract_span_unbalanced_keeps_tail() {
        let raw = "prefix {\"a\": [1, 2";
        assert_eq!(Repair::ExtractJsonSpan.apply(raw), "{\"a\": [1, 2");
    }

    #[test]
    fn test_unquote_stray_trailing_quote() {
        let raw = "{\"id\": 1\", \"front\": \"Q\"}";
        assert_eq!(
            Repair::UnquoteNumericIds.apply(raw),
            "{\"id\": 1, \"front\": \"Q\"}"
        );
    }

    #[test]
    fn test_unquote_quoted_number() {
        let raw = "[{\"id\": \"2\" }, {\"id\":\"3\"}]";
        assert_eq!(
            Repair::UnquoteNumericIds.apply(raw),
            "[{\"id\": 2 }, {\"id\": 3}]"
        );
    }

    #[test]
    fn test_unquote_leaves_other_keys_alone() {
        let raw = "{\"uuid\": \"42\", \"id\": \"abc\"}";
        assert_eq!(Repair::UnquoteNumericIds.apply(raw), raw);
    }

    #[test]
    fn test_strip_trailing_commas() {
        let raw = "{\"tags\": [\"a\", \"b\",], \"x\": 1,\n}";
        assert_eq!(
            Repair::StripTrailingCommas.apply(raw),
            "{\"tags\": [\"a\", \"b\"], \"x\": 1\n}"
        );
    }

    #[test]
    fn test_strip_trailing_commas_keeps_commas_in_strings() {
        let raw = "[\"one,]\", \"two\"]";
        assert_eq!(Repair::StripTrailingCommas.apply(raw), raw);
    }

    #[test]
    fn test_repairs_compose() {
        let raw = "```json\n[{\"id\": 1\", \"front\": \"Q\",},]\n```";
        let repaired = apply_all(
            raw,
            &[
                Repair::StripCodeFence,
                Repair::ExtractJsonSpan,
                Repair::UnquoteNumericIds,
                Repair::StripTrailingCommas,
            ],
        );
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value, serde_json::json!([{"id": 1, "front": "Q"}]));
    }
}
