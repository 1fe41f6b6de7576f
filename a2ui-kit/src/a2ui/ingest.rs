//! A2UI Message Ingestor
//!
//! Extracts protocol messages from free-form model output: conversational
//! text, then a delimiter, then a JSON array of messages.

use serde_json::Value;

use super::{
    diagnostic::{IngestError, IngestFailure},
    message::ACTION_KEYS,
};

/// Separates the conversational reply from the JSON payload.
pub const A2UI_DELIMITER: &str = "---a2ui_JSON---";

/// Successful ingestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ingested {
    /// Conversational text before the delimiter (or the whole blob)
    pub text: String,

    /// Raw messages in payload order, not yet validated
    pub messages: Vec<Value>,

    /// How many elements were wrapped as `surfaceUpdate`
    pub repairs: usize,
}

/// Split a model reply into conversational text and raw messages.
///
/// A reply without the delimiter is a text-only reply. A payload that is
/// not valid JSON is an [`IngestFailure`] carrying the raw text so the
/// caller can fall back to showing it.
pub fn ingest(blob: &str) -> Result<Ingested, IngestFailure> {
    let Some((text, payload)) = blob.split_once(A2UI_DELIMITER) else {
        return Ok(Ingested {
            text: blob.trim().to_string(),
            ..Default::default()
        });
    };

    let text = text.trim().to_string();
    let raw = strip_code_fence(payload).to_string();

    let parsed = match serde_json::from_str::<Value>(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            ::log::warn!("[A2UI ingest] Payload is not valid JSON: {}", e);
            return Err(IngestFailure {
                text,
                raw,
                error: IngestError::Json(e),
            });
        }
    };

    let elements = match parsed {
        Value::Array(elements) => elements,
        object @ Value::Object(_) => vec![object],
        other => {
            let found = json_type_name(&other);
            ::log::warn!("[A2UI ingest] Payload is a JSON {}, not messages", found);
            return Err(IngestFailure {
                text,
                raw,
                error: IngestError::NotMessages(found),
            });
        }
    };

    let mut repairs = 0;
    let messages = elements
        .into_iter()
        .map(|element| match repair_missing_wrapper(element) {
            Ok(repaired) => {
                repairs += 1;
                repaired
            }
            Err(untouched) => untouched,
        })
        .collect();

    if repairs > 0 {
        ::log::warn!("[A2UI ingest] Wrapped {} bare surfaceUpdate payload(s)", repairs);
    }

    Ok(Ingested {
        text,
        messages,
        repairs,
    })
}

/// Remove an optional leading ```` ```json ```` / ```` ``` ```` marker and an
/// optional trailing ```` ``` ````.
pub fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

/// Wrap an element that is a bare `surfaceUpdate` body.
///
/// Applies only to objects with no action key that carry both `surfaceId`
/// and `components`. Returns the element unchanged in `Err` otherwise.
fn repair_missing_wrapper(element: Value) -> Result<Value, Value> {
    let bare_update = match &element {
        Value::Object(object) => {
            !ACTION_KEYS.iter().any(|key| object.contains_key(*key))
                && object.contains_key("surfaceId")
                && object.contains_key("components")
        }
        _ => false,
    };
    if !bare_update {
        return Err(element);
    }

    Ok(serde_json::json!({ "surfaceUpdate": element }))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
