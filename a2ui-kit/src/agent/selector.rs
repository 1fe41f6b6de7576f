//! The selector's verdict: plain text, or which template to fill.

use serde::Deserialize;

use crate::a2ui::strip_code_fence;

use super::templates::SIMPLE_MESSAGE;

/// What the selector chose for a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Answer with plain text
    Text,

    /// Fill in the named template
    Ui { template_id: String },
}

impl Decision {
    pub fn template_id(&self) -> Option<&str> {
        match self {
            Decision::Text => None,
            Decision::Ui { template_id } => Some(template_id),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SelectorReply {
    #[serde(default)]
    decision: Option<String>,

    #[serde(default)]
    template_id: Option<String>,
}

/// Read the selector model's JSON reply, fenced or not.
///
/// A reply that does not parse is a [`Decision::Text`]. A `UI` decision
/// without a template id falls back to `SIMPLE_MESSAGE`.
pub fn parse_decision(reply: &str) -> Decision {
    let parsed: SelectorReply = match serde_json::from_str(strip_code_fence(reply)) {
        Ok(parsed) => parsed,
        Err(err) => {
            ::log::error!("[A2UI agent] Failed to parse selector decision, using text: {}", err);
            return Decision::Text;
        }
    };

    match parsed.decision.as_deref().map(str::trim) {
        Some(decision) if decision.eq_ignore_ascii_case("UI") => {
            let template_id = parsed
                .template_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| SIMPLE_MESSAGE.to_string());
            Decision::Ui { template_id }
        }
        _ => Decision::Text,
    }
}
