//! Fixed replies used when the model cannot be reached.

use serde_json::{Value, json};

use crate::a2ui::A2UI_DELIMITER;

/// Surface id used by fallback replies.
pub const FALLBACK_SURFACE_ID: &str = "main";

pub const FALLBACK_TEXT: &str =
    "I'm sorry, I encountered an error generating the response. Please try again later.";

const FALLBACK_CARD_TEXT: &str =
    "I'm sorry, I'm having trouble generating the response right now. Please try again in a few moments.";

/// Messages for a Column -> Card -> Text surface showing `message`.
pub fn fallback_messages(message: &str) -> Value {
    json!([
        {"beginRendering": {"surfaceId": FALLBACK_SURFACE_ID, "root": "root-column"}},
        {"surfaceUpdate": {
            "surfaceId": FALLBACK_SURFACE_ID,
            "components": [
                {"id": "root-column", "component": {"Column": {"children": {"explicitList": ["message-card"]}}}},
                {"id": "message-card", "component": {"Card": {"child": "message-text"}}},
                {"id": "message-text", "component": {"Text": {"text": {"literalString": message}}}}
            ]
        }}
    ])
}

/// A complete model-shaped reply: apology text, delimiter, fallback surface.
pub fn fallback_reply() -> String {
    format!(
        "{}\n\n{}\n{}",
        FALLBACK_TEXT,
        A2UI_DELIMITER,
        fallback_messages(FALLBACK_CARD_TEXT)
    )
}
