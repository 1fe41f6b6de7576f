//! A2UI Diagnostics and Errors
//!
//! Non-fatal conditions are collected as [`Diagnostic`] values and returned
//! next to successful results. The few hard failures are typed errors.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A non-fatal condition observed while applying messages or projecting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A raw message in a batch was skipped
    #[serde(rename_all = "camelCase")]
    InvalidMessage { index: usize, reason: String },

    /// The same component id appeared twice in one `surfaceUpdate`;
    /// the later definition was kept
    #[serde(rename_all = "camelCase")]
    DuplicateComponent {
        surface_id: String,
        component_id: String,
    },

    /// A structural slot names a component the surface does not define
    #[serde(rename_all = "camelCase")]
    DanglingReference {
        surface_id: String,
        parent_id: String,
        component_id: String,
    },

    /// A component is already on the active resolution path
    #[serde(rename_all = "camelCase")]
    Cycle {
        surface_id: String,
        component_id: String,
    },

    /// Projection went deeper than the recursion bound
    #[serde(rename_all = "camelCase")]
    DepthLimit {
        surface_id: String,
        component_id: String,
        depth: usize,
    },

    /// Projection produced as many nodes as it is allowed to; the rest of
    /// the tree was cut
    #[serde(rename_all = "camelCase")]
    NodeLimit {
        surface_id: String,
        component_id: String,
        limit: usize,
    },

    /// A path reference did not resolve to a usable value
    #[serde(rename_all = "camelCase")]
    UnresolvedBinding {
        surface_id: String,
        node_id: String,
        path: String,
    },

    /// A template's data binding points at something that cannot be iterated
    #[serde(rename_all = "camelCase")]
    TemplateSourceNotMapping {
        surface_id: String,
        component_id: String,
        path: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidMessage { index, reason } => {
                write!(f, "message[{}] skipped: {}", index, reason)
            }
            Diagnostic::DuplicateComponent {
                surface_id,
                component_id,
            } => write!(
                f,
                "surface '{}': component '{}' defined twice in one update",
                surface_id, component_id
            ),
            Diagnostic::DanglingReference {
                surface_id,
                parent_id,
                component_id,
            } => write!(
                f,
                "surface '{}': '{}' references unknown component '{}'",
                surface_id, parent_id, component_id
            ),
            Diagnostic::Cycle {
                surface_id,
                component_id,
            } => write!(
                f,
                "surface '{}': cycle at component '{}'",
                surface_id, component_id
            ),
            Diagnostic::DepthLimit {
                surface_id,
                component_id,
                depth,
            } => write!(
                f,
                "surface '{}': component '{}' exceeds depth {}",
                surface_id, component_id, depth
            ),
            Diagnostic::NodeLimit {
                surface_id,
                component_id,
                limit,
            } => write!(
                f,
                "surface '{}': node limit {} reached at component '{}'",
                surface_id, limit, component_id
            ),
            Diagnostic::UnresolvedBinding {
                surface_id,
                node_id,
                path,
            } => write!(
                f,
                "surface '{}': node '{}' has unresolved binding '{}'",
                surface_id, node_id, path
            ),
            Diagnostic::TemplateSourceNotMapping {
                surface_id,
                component_id,
                path,
            } => write!(
                f,
                "surface '{}': template '{}' data binding '{}' is not a mapping",
                surface_id, component_id, path
            ),
        }
    }
}

/// Why a raw message was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidMessage {
    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("message has no action key")]
    NoActionKey,

    #[error("message has several action keys: {}", .0.join(", "))]
    SeveralActionKeys(Vec<String>),

    #[error("invalid {action}: {reason}")]
    Schema { action: String, reason: String },
}

/// The only hard failure of projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceNotRenderable {
    #[error("unknown surface '{0}'")]
    UnknownSurface(String),

    #[error("surface '{0}' has not received beginRendering")]
    NotStarted(String),

    #[error("root component '{root}' of surface '{surface_id}' is not defined")]
    MissingRoot { surface_id: String, root: String },
}

/// Why an upstream payload could not be turned into messages.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array or object, found {0}")]
    NotMessages(&'static str),
}

/// A payload that followed the delimiter but did not parse.
///
/// Carries everything a caller needs to fall back to plain text.
#[derive(Debug, Error)]
#[error("could not parse A2UI payload: {error}")]
pub struct IngestFailure {
    /// Conversational text before the delimiter
    pub text: String,

    /// The payload text as received, after fence stripping
    pub raw: String,

    #[source]
    pub error: IngestError,
}

impl IngestFailure {
    /// Text to show the user instead of a surface.
    pub fn fallback_text(&self) -> String {
        if self.text.is_empty() {
            self.raw.clone()
        } else {
            format!("{}\n\n{}", self.text, self.raw)
        }
    }
}
