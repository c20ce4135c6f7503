//! Dual-parse decoding of raw solver payloads.
//!
//! The model is asked for a bare JSON object but regularly returns one of:
//!
//! - the object itself (already decoded by the upstream envelope)
//! - the object as a JSON string
//! - the object as a JSON string inside another JSON string
//! - any of the above wrapped in a markdown code fence
//!
//! [`normalize`] accepts all of them and gives up quietly (`None`) on anything
//! else. Decoding stops after two string layers.

use crate::document::SolveDocument;
use regex::Regex;
use serde_json::Value;
use once_cell::sync::Lazy;

/// ```` ```lang\n ... \n``` ```` around the whole payload.
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A```\w*[ \t]*\r?\n(.*?)\r?\n?```\z").expect("valid regex literal")
});

/// A solver payload before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// JSON text, possibly fenced, possibly encoded twice.
    Encoded(String),
    /// A document that arrived already structured.
    Structured(SolveDocument),
}

impl RawResponse {
    /// Classifies the `result` member of an upstream envelope or stored record.
    ///
    /// Strings stay encoded, objects are read as documents, every other JSON
    /// type yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(raw) => Some(RawResponse::Encoded(raw)),
            value @ Value::Object(_) => SolveDocument::from_value(value).map(RawResponse::Structured),
            other => {
                log::debug!("Ignoring {} payload", json_kind(&other));
                None
            }
        }
    }
}

impl From<String> for RawResponse {
    fn from(raw: String) -> Self {
        RawResponse::Encoded(raw)
    }
}

impl From<&str> for RawResponse {
    fn from(raw: &str) -> Self {
        RawResponse::Encoded(raw.to_string())
    }
}

impl From<SolveDocument> for RawResponse {
    fn from(doc: SolveDocument) -> Self {
        RawResponse::Structured(doc)
    }
}

/// Turns a raw payload into a [`SolveDocument`].
///
/// - `None` stays `None`.
/// - A structured document is returned untouched.
/// - Encoded text goes through [`decode_str`].
///
/// # Examples
///
/// ```
/// use mathseek_core::decode::{normalize, RawResponse};
///
/// let doc = normalize(Some(RawResponse::from(r#"{"final_answer":"$x=1$"}"#))).unwrap();
/// assert_eq!(doc.final_answer.as_deref(), Some("$x=1$"));
///
/// assert!(normalize(Some("not json at all".into())).is_none());
/// assert!(normalize(None).is_none());
/// ```
pub fn normalize(input: Option<RawResponse>) -> Option<SolveDocument> {
    match input? {
        RawResponse::Structured(doc) => Some(doc),
        RawResponse::Encoded(raw) => decode_str(&raw),
    }
}

/// Decodes JSON text that holds a document directly or as a JSON string.
///
/// Each of the (at most two) layers is parsed strictly first and, failing
/// that, once more with an enclosing code fence removed.
pub fn decode_str(raw: &str) -> Option<SolveDocument> {
    match parse_layer(raw)? {
        value @ Value::Object(_) => SolveDocument::from_value(value),
        Value::String(inner) => {
            log::debug!("Payload is double-encoded, decoding inner string");
            match parse_layer(&inner)? {
                value @ Value::Object(_) => SolveDocument::from_value(value),
                other => {
                    log::warn!(
                        "Double-encoded payload decoded to {} instead of an object",
                        json_kind(&other)
                    );
                    None
                }
            }
        }
        other => {
            log::warn!("Payload decoded to {} instead of an object", json_kind(&other));
            None
        }
    }
}

/// Returns the content of a single markdown code fence enclosing `raw`.
///
/// ```
/// use mathseek_core::decode::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{}\n```"), Some("{}"));
/// assert_eq!(strip_code_fence("{}"), None);
/// ```
pub fn strip_code_fence(raw: &str) -> Option<&str> {
    CODE_FENCE
        .captures(raw.trim())
        .and_then(|caps| caps.get(1))
        .map(|inner| inner.as_str())
}

fn parse_layer(raw: &str) -> Option<Value> {
    let err = match serde_json::from_str(raw) {
        Ok(value) => return Some(value),
        Err(e) => e,
    };

    let Some(inner) = strip_code_fence(raw) else {
        log::warn!("Payload is not valid JSON: {}", err);
        return None;
    };

    log::debug!("Payload is not valid JSON ({}), retrying without code fence", err);
    match serde_json::from_str(inner) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Fenced payload is not valid JSON: {}", e);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_object() {
        let doc = decode_str(r#"{"problem_text":"x+1=2"}"#).unwrap();
        assert_eq!(doc.problem_text.as_deref(), Some("x+1=2"));
    }

    #[test]
    fn test_decode_fenced_object() {
        let raw = "```json\n{\"notes\": \"ok\"}\n```";
        let doc = decode_str(raw).unwrap();
        assert_eq!(doc.notes.as_deref(), Some("ok"));
    }

    #[test]
    fn test_decode_fence_without_language_tag() {
        let raw = "  ```\n{\"notes\": \"ok\"}\n```  ";
        assert!(decode_str(raw).is_some());
    }

    #[test]
    fn test_decode_double_encoded() {
        let inner = r#"{"final_answer":"done"}"#;
        let outer = serde_json::to_string(inner).unwrap();
        let doc = decode_str(&outer).unwrap();
        assert_eq!(doc.final_answer.as_deref(), Some("done"));
    }

    #[test]
    fn test_decode_double_encoded_fenced_inner() {
        let inner = "```json\n{\"final_answer\":\"done\"}\n```";
        let outer = serde_json::to_string(inner).unwrap();
        assert!(decode_str(&outer).is_some());
    }

    #[test]
    fn test_decode_triple_encoded_is_rejected() {
        let once = r#"{"final_answer":"done"}"#;
        let twice = serde_json::to_string(once).unwrap();
        let thrice = serde_json::to_string(&twice).unwrap();
        assert!(decode_str(&thrice).is_none());
    }

    #[test]
    fn test_decode_non_object_values() {
        assert!(decode_str("[1, 2]").is_none());
        assert!(decode_str("42").is_none());
        assert!(decode_str("null").is_none());
        assert!(decode_str(r#""just a string""#).is_none());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_str("not json at all").is_none());
        assert!(decode_str("").is_none());
        assert!(decode_str("```json\nstill not json\n```").is_none());
    }

    #[test]
    fn test_normalize_structured_passthrough() {
        let doc = SolveDocument {
            notes: Some("kept".into()),
            ..Default::default()
        };
        assert_eq!(normalize(Some(doc.clone().into())), Some(doc));
    }

    #[test]
    fn test_raw_response_from_value() {
        assert!(matches!(
            RawResponse::from_value(Value::String("{}".into())),
            Some(RawResponse::Encoded(_))
        ));
        assert!(matches!(
            RawResponse::from_value(serde_json::json!({ "notes": "n" })),
            Some(RawResponse::Structured(_))
        ));
        assert!(RawResponse::from_value(serde_json::json!(7)).is_none());
        assert!(RawResponse::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_strip_code_fence_requires_both_ends() {
        assert_eq!(strip_code_fence("```json\n{}"), None);
        assert_eq!(strip_code_fence("{}\n```"), None);
        assert_eq!(strip_code_fence("```json\n{\"a\":1}```"), Some("{\"a\":1}"));
    }
}
