//! Built-in UI templates: what the selector may pick and what the generator
//! fills in.

/// Id of the plain-text template.
pub const SIMPLE_MESSAGE: &str = "SIMPLE_MESSAGE";

/// A UI template the generator may be told to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],

    /// A2UI messages the generator reproduces, changing only the data model
    pub json: &'static str,
}

/// Built-in templates, in catalog order.
pub const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        id: "SINGLE_COLUMN_LIST",
        description: "Use this when the response involves a list of items (e.g., top 5 movies, search results, recommended products).",
        keywords: &["list", "show", "top", "best", "compare", "results", "recommend", "options"],
        json: SINGLE_COLUMN_LIST_JSON,
    },
    TemplateInfo {
        id: "FORM",
        description: "Use this when you need to collect information from the user (e.g., sign up, survey, booking request).",
        keywords: &["form", "register", "contact", "book", "reserve", "submit", "fill"],
        json: FORM_JSON,
    },
    TemplateInfo {
        id: SIMPLE_MESSAGE,
        description: "Use this for simple text responses, answers to questions, jokes, or chit-chat where no complex UI is needed.",
        keywords: &[],
        json: SIMPLE_MESSAGE_JSON,
    },
    TemplateInfo {
        id: "CONFIRMATION",
        description: "Use this when confirming an action or submission (e.g., 'Booking confirmed', 'Message sent').",
        keywords: &["confirm", "confirmed", "done", "sent", "success", "performed", "action"],
        json: CONFIRMATION_JSON,
    },
];

/// Look up a built-in template by id.
pub fn template_info(id: &str) -> Option<&'static TemplateInfo> {
    TEMPLATES.iter().find(|template| template.id == id)
}

const SINGLE_COLUMN_LIST_JSON: &str = r##"[
  {"beginRendering": {"surfaceId": "default", "root": "root-column", "styles": {"primaryColor": "#FF0000", "font": "Roboto"}}},
  {"surfaceUpdate": {"surfaceId": "default", "components": [
    {"id": "root-column", "component": {"Column": {"children": {"explicitList": ["title-heading", "item-list"]}}}},
    {"id": "title-heading", "component": {"Text": {"usageHint": "h1", "text": {"path": "title"}}}},
    {"id": "item-list", "component": {"List": {"direction": "vertical", "children": {"template": {"componentId": "item-card-template", "dataBinding": "/items"}}}}},
    {"id": "item-card-template", "component": {"Card": {"child": "card-layout"}}},
    {"id": "card-layout", "component": {"Row": {"children": {"explicitList": ["template-image", "card-details"]}}}},
    {"id": "template-image", "weight": 1, "component": {"Image": {"url": {"path": "imageUrl"}}}},
    {"id": "card-details", "weight": 2, "component": {"Column": {"children": {"explicitList": ["template-name", "template-detail"]}}}},
    {"id": "template-name", "component": {"Text": {"usageHint": "h3", "text": {"path": "name"}}}},
    {"id": "template-detail", "component": {"Text": {"text": {"path": "detail"}}}}
  ]}},
  {"dataModelUpdate": {"surfaceId": "default", "path": "/", "contents": [
    {"key": "title", "valueString": "List Title"},
    {"key": "items", "valueMap": []}
  ]}}
]"##;

const FORM_JSON: &str = r##"[
  {"beginRendering": {"surfaceId": "form-surface", "root": "form-column", "styles": {"primaryColor": "#0000FF", "font": "Roboto"}}},
  {"surfaceUpdate": {"surfaceId": "form-surface", "components": [
    {"id": "form-column", "component": {"Column": {"children": {"explicitList": ["form-title", "name-field", "email-field", "submit-button"]}}}},
    {"id": "form-title", "component": {"Text": {"usageHint": "h2", "text": {"path": "title"}}}},
    {"id": "name-field", "component": {"TextField": {"label": {"literalString": "Name"}, "text": {"path": "userName"}}}},
    {"id": "email-field", "component": {"TextField": {"label": {"literalString": "Email"}, "text": {"path": "userEmail"}}}},
    {"id": "submit-button", "component": {"Button": {"child": "submit-text", "primary": true, "action": {"name": "submit_form", "context": [
      {"key": "name", "value": {"path": "userName"}},
      {"key": "email", "value": {"path": "userEmail"}}
    ]}}}},
    {"id": "submit-text", "component": {"Text": {"text": {"literalString": "Submit"}}}}
  ]}},
  {"dataModelUpdate": {"surfaceId": "form-surface", "path": "/", "contents": [
    {"key": "title", "valueString": "Form Title"},
    {"key": "userName", "valueString": ""},
    {"key": "userEmail", "valueString": ""}
  ]}}
]"##;

const SIMPLE_MESSAGE_JSON: &str = r##"[
  {"beginRendering": {"surfaceId": "main", "root": "root-column"}},
  {"surfaceUpdate": {"surfaceId": "main", "components": [
    {"id": "root-column", "component": {"Column": {"children": {"explicitList": ["message-card"]}}}},
    {"id": "message-card", "component": {"Card": {"child": "message-text"}}},
    {"id": "message-text", "component": {"Text": {"text": {"literal": "REPLACE_WITH_YOUR_TEXT_RESPONSE"}}}}
  ]}}
]"##;

const CONFIRMATION_JSON: &str = r##"[
  {"beginRendering": {"surfaceId": "confirmation", "root": "confirm-card", "styles": {"primaryColor": "#00AA00", "font": "Roboto"}}},
  {"surfaceUpdate": {"surfaceId": "confirmation", "components": [
    {"id": "confirm-card", "component": {"Card": {"child": "confirm-column"}}},
    {"id": "confirm-column", "component": {"Column": {"children": {"explicitList": ["confirm-title", "confirm-message", "divider", "close-button"]}}}},
    {"id": "confirm-title", "component": {"Text": {"usageHint": "h2", "text": {"path": "title"}}}},
    {"id": "confirm-message", "component": {"Text": {"text": {"path": "message"}}}},
    {"id": "divider", "component": {"Divider": {}}},
    {"id": "close-button", "component": {"Button": {"child": "close-text", "action": {"name": "close_confirmation", "context": []}}}},
    {"id": "close-text", "component": {"Text": {"text": {"literalString": "Close"}}}}
  ]}},
  {"dataModelUpdate": {"surfaceId": "confirmation", "path": "/", "contents": [
    {"key": "title", "valueString": "Success!"},
    {"key": "message", "valueString": "Your action was completed."}
  ]}}
]"##;
