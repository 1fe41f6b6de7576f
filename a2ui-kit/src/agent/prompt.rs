//! Instructions for the two model calls of a turn: the selector, then the
//! generator.

use crate::a2ui::{A2UI_DELIMITER, ComponentTag};

use super::templates::{SIMPLE_MESSAGE, TEMPLATES, TemplateInfo, template_info};

const TEXT_ONLY_INSTRUCTIONS: &str = "You are a helpful assistant. Please respond to the user's request with a clear and concise text response.";

/// Build the selector's instructions.
///
/// `candidates` are template ids, best first. Unknown ids are skipped; when
/// none is usable the whole catalog is offered.
pub fn selector_instructions(candidates: &[String]) -> String {
    let mut templates: Vec<&TemplateInfo> = candidates
        .iter()
        .filter_map(|id| template_info(id))
        .collect();
    if templates.is_empty() {
        templates = TEMPLATES.iter().collect();
    }

    let mut out = String::new();
    out.push_str("You decide whether the user's request is best served by a plain text reply or by one of the UI templates below.\n\n");

    out.push_str("--- UI TEMPLATES (best match first) ---\n");
    for template in &templates {
        out.push_str(&format!("- {}: {}\n", template.id, template.description));
    }

    out.push_str("\nRules:\n");
    out.push_str("1. Prefer `UI` and pick the template whose description fits the request best.\n");
    out.push_str(&format!(
        "2. Jokes, greetings and short answers still use `UI` with the {} template.\n",
        SIMPLE_MESSAGE
    ));
    out.push_str("3. Choose `TEXT` only when no template can hold the answer.\n\n");

    out.push_str("Reply with a single JSON object and nothing else:\n");
    out.push_str("{\"decision\": \"UI\" or \"TEXT\", \"template_id\": \"<template id>\" or null, \"reason\": \"<one sentence>\"}\n");

    out
}

/// Build the generator's instructions for the chosen template.
///
/// With no template, or an id the catalog does not know, the model is asked
/// for a plain text reply.
pub fn generator_instructions(template_id: Option<&str>) -> String {
    let Some(template) = template_id.and_then(template_info) else {
        return TEXT_ONLY_INSTRUCTIONS.to_string();
    };

    let mut out = String::new();
    out.push_str("You are a helpful assistant that answers with a rich UI built from a fixed template.\n\n");
    out.push_str("You MUST follow these rules:\n");
    out.push_str(&format!(
        "1. Your response MUST be in two parts, separated by the delimiter: `{}`.\n",
        A2UI_DELIMITER
    ));
    out.push_str("2. The first part is your conversational text response.\n");
    out.push_str("3. The second part is the UI TEMPLATE below as a JSON array, with its `dataModelUpdate` filled in for the user's request.\n\n");

    out.push_str(&format!("--- UI TEMPLATE ({}) ---\n", template.id));
    out.push_str(template.json);
    out.push_str("\n\n--- DATA MODEL RULES ---\n");
    out.push_str("- Fill the `valueString`, `valueNumber`, `valueBoolean` and `valueMap` entries of the `dataModelUpdate`.\n");
    out.push_str("- For a list, add one `valueMap` entry per item under the list's key; each item is itself a `valueMap`.\n");
    out.push_str("- Replace any REPLACE_WITH_ placeholder text with your own content.\n");
    out.push_str("- Keep `beginRendering` and `surfaceUpdate` as they are unless the answer cannot fit.\n");

    out.push_str("\n--- AVAILABLE COMPONENTS ---\n");
    for tag in ComponentTag::all() {
        out.push_str(&format!("- {}: {}\n", tag.name(), tag.description()));
    }

    out
}
