//! Response normalization
//!
//! The portal embeds validation errors at whatever depth the failing form
//! section lives, so every response is walked in full before it is trusted.
//!
//! Collection order is fixed:
//! 1. `errorKeys` lists found depth-first, in document order
//! 2. the top-level `sectionErrorKeys` list
//! 3. the `messages.error` value

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Result, TunesError};

const ERROR_KEYS: &str = "errorKeys";
const SECTION_ERROR_KEYS: &str = "sectionErrorKeys";
const SECTION_INFO_KEYS: &str = "sectionInfoKeys";
const SECTION_WARNING_KEYS: &str = "sectionWarningKeys";

/// A response envelope that passed error extraction
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The envelope, unchanged
    pub data: Value,
    /// Top-level `sectionInfoKeys`
    pub info: Vec<String>,
    /// Top-level `sectionWarningKeys`
    pub warnings: Vec<String>,
}

impl Normalized {
    /// Consume and return the envelope
    pub fn into_data(self) -> Value {
        self.data
    }
}

/// Parse a JSON response body, optionally narrowing to one top-level key.
///
/// A missing or `null` value at `expected_key` is an unexpected response.
pub fn parse_response(body: &str, expected_key: Option<&str>) -> Result<Value> {
    let mut parsed: Value = serde_json::from_str(body)
        .map_err(|e| TunesError::UnexpectedResponse(format!("{}: {}", e, truncate(body))))?;

    let content = match expected_key {
        Some(key) => parsed.get_mut(key).map(Value::take).unwrap_or(Value::Null),
        None => parsed,
    };

    if content.is_null() {
        return Err(TunesError::UnexpectedResponse(truncate(body)));
    }

    Ok(content)
}

/// Scan an envelope for errors and surface info/warning section keys.
///
/// Anything that is not a JSON object is passed through without inspection.
pub fn normalize(envelope: Value) -> Result<Normalized> {
    let Some(object) = envelope.as_object() else {
        return Ok(Normalized {
            data: envelope,
            info: Vec::new(),
            warnings: Vec::new(),
        });
    };

    let mut errors = Vec::new();
    collect_error_keys(&envelope, &mut errors);
    errors.extend(string_list(object.get(SECTION_ERROR_KEYS)));

    if let Some(message) = object.get("messages").and_then(|m| m.get("error")) {
        errors.extend(string_list(Some(message)));
    }

    if !errors.is_empty() {
        debug!(count = errors.len(), "response carried errors");
        return Err(TunesError::RemoteValidation(errors));
    }

    let info = string_list(object.get(SECTION_INFO_KEYS));
    let warnings = string_list(object.get(SECTION_WARNING_KEYS));

    if info.is_empty() && warnings.is_empty() {
        debug!("request was successful");
    }
    for message in &info {
        info!(message = %message, "portal info");
    }
    for message in &warnings {
        warn!(message = %message, "portal warning");
    }

    Ok(Normalized {
        data: envelope,
        info,
        warnings,
    })
}

/// Depth-first walk collecting every non-empty `errorKeys` list.
///
/// A value is descended into before its own `errorKeys` entry is taken, so
/// nested errors inside an `errorKeys` list come first.
fn collect_error_keys(value: &Value, errors: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                collect_error_keys(child, errors);

                if key == ERROR_KEYS {
                    if let Value::Array(items) = child {
                        errors.extend(items.iter().map(message_text));
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_error_keys(item, errors);
            }
        }
        _ => {}
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(message_text).collect(),
        Some(other) => vec![message_text(other)],
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 512;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(result: Result<Normalized>) -> Vec<String> {
        match result {
            Err(TunesError::RemoteValidation(messages)) => messages,
            other => panic!("expected remote validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_error_keys_three_levels_deep() {
        let envelope = json!({
            "details": {
                "value": [
                    {
                        "name": {
                            "value": "My App",
                            "errorKeys": ["Name is taken.", "Name is too long."]
                        }
                    }
                ]
            }
        });

        assert_eq!(
            messages(normalize(envelope)),
            vec!["Name is taken.", "Name is too long."]
        );
    }

    #[test]
    fn test_nested_errors_precede_section_errors() {
        let envelope = json!({
            "sectionErrorKeys": ["Section failed."],
            "newApp": {
                "vendorId": { "value": "", "errorKeys": ["SKU is required."] }
            },
            "versionString": { "value": "1.0", "errorKeys": ["Version is invalid."] }
        });

        assert_eq!(
            messages(normalize(envelope)),
            vec!["SKU is required.", "Version is invalid.", "Section failed."]
        );
    }

    #[test]
    fn test_messages_error_is_appended_last() {
        let envelope = json!({
            "messages": { "error": "Your session has expired." },
            "sectionErrorKeys": ["Section failed."],
            "a": { "errorKeys": ["Nested."] }
        });

        let err = normalize(envelope).unwrap_err();
        assert_eq!(err.to_string(), "Nested. Section failed. Your session has expired.");
    }

    #[test]
    fn test_messages_error_list() {
        let envelope = json!({ "messages": { "error": ["First.", "Second."] } });
        assert_eq!(messages(normalize(envelope)), vec!["First.", "Second."]);
    }

    #[test]
    fn test_empty_error_keys_are_ignored() {
        let envelope = json!({
            "name": { "value": "ok", "errorKeys": [] },
            "sectionErrorKeys": [],
            "messages": { "error": null }
        });

        let normalized = normalize(envelope.clone()).unwrap();
        assert_eq!(normalized.data, envelope);
    }

    #[test]
    fn test_warnings_are_reported_not_fatal() {
        let envelope = json!({
            "sectionWarningKeys": ["Screenshots are missing for iPad."],
            "sectionInfoKeys": ["Your changes were saved."],
            "details": { "value": [] }
        });

        let normalized = normalize(envelope.clone()).unwrap();
        assert_eq!(normalized.data, envelope);
        assert_eq!(normalized.warnings, vec!["Screenshots are missing for iPad."]);
        assert_eq!(normalized.info, vec!["Your changes were saved."]);
    }

    #[test]
    fn test_non_object_envelope_passes_through() {
        let envelope = json!([{ "errorKeys": ["ignored"] }]);
        let normalized = normalize(envelope.clone()).unwrap();
        assert_eq!(normalized.into_data(), envelope);

        assert_eq!(normalize(Value::Null).unwrap().data, Value::Null);
    }

    #[test]
    fn test_non_string_error_elements() {
        let envelope = json!({ "field": { "errorKeys": [42, { "code": "X" }] } });
        assert_eq!(messages(normalize(envelope)), vec!["42", r#"{"code":"X"}"#]);
    }

    #[test]
    fn test_parse_response_expected_key() {
        let body = r#"{"data": {"summaries": []}, "messages": {}}"#;
        let data = parse_response(body, Some("data")).unwrap();
        assert_eq!(data, json!({ "summaries": [] }));

        let whole = parse_response(body, None).unwrap();
        assert!(whole.get("messages").is_some());
    }

    #[test]
    fn test_parse_response_missing_key() {
        let err = parse_response(r#"{"statusCode": "ERROR"}"#, Some("data")).unwrap_err();
        assert!(matches!(err, TunesError::UnexpectedResponse(ref body) if body.contains("ERROR")));

        let err = parse_response(r#"{"data": null}"#, Some("data")).unwrap_err();
        assert!(matches!(err, TunesError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = parse_response("<html>Maintenance</html>", Some("data")).unwrap_err();
        assert!(matches!(err, TunesError::UnexpectedResponse(ref msg) if msg.contains("Maintenance")));
    }
}
