//! Extraction of JSON payloads from LLM text.

use serde::de::DeserializeOwned;

use crate::ports::AIError;

/// Removes a surrounding Markdown code fence (with or without a `json` tag).
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        text = rest.trim_start();
        if let Some(body) = text.strip_suffix("```") {
            text = body;
        }
    }
    text.trim()
}

/// Narrows text to its outermost JSON object when the model added prose
/// around it.
pub fn extract_object(raw: &str) -> &str {
    let text = strip_code_fences(raw);
    if text.starts_with('{') {
        return text;
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parses a JSON value out of a model response.
///
/// # Errors
///
/// Returns `AIError::Parse` when no valid JSON of the expected shape is found.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, AIError> {
    serde_json::from_str(extract_object(raw))
        .map_err(|e| AIError::parse(format!("model returned invalid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn strips_tagged_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```JSON {\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fences("Just words"), "Just words");
    }

    #[test]
    fn extracts_object_from_prose() {
        let raw = "Sure! Here is the form:\n{\"title\": \"X\"}\nHope that helps.";
        assert_eq!(extract_object(raw), "{\"title\": \"X\"}");
    }

    #[test]
    fn parse_json_reports_parse_error() {
        let err = parse_json::<Value>("no json here").unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn parse_json_reads_fenced_object() {
        let value: Value = parse_json("```json\n{\"ok\": true}\n```").unwrap();
        assert_eq!(value["ok"], true);
    }
}
