//! A2UI Value References
//!
//! Every dynamic component property is a value reference: either a literal
//! or a path into the surface's data model.

use serde::{Deserialize, Deserializer, Serialize};

/// A literal-or-path descriptor.
///
/// On the wire exactly one key is expected. When a model emits more than
/// one, literals win over `path`, and among literals the order is
/// string, number, boolean, array.
///
/// # Examples
///
/// ```json
/// {"literalString": "Hello World"}
/// {"literalNumber": 4.8}
/// {"literalArray": ["a", "b"]}
/// {"path": "/user/name"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueRef {
    #[serde(rename = "literalString")]
    LiteralString(String),
    #[serde(rename = "literalNumber")]
    LiteralNumber(f64),
    #[serde(rename = "literalBoolean")]
    LiteralBoolean(bool),
    #[serde(rename = "literalArray")]
    LiteralArray(Vec<String>),
    #[serde(rename = "path")]
    Path(String),
}

/// Wire shape with every arm optional, so precedence can be applied after
/// decoding instead of failing on the first unexpected combination.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValueRef {
    #[serde(default, alias = "literal")]
    literal_string: Option<String>,
    #[serde(default)]
    literal_number: Option<f64>,
    #[serde(default)]
    literal_boolean: Option<bool>,
    #[serde(default)]
    literal_array: Option<Vec<String>>,
    #[serde(default)]
    path: Option<String>,
}

impl<'de> Deserialize<'de> for ValueRef {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = RawValueRef::deserialize(d)?;

        if let Some(s) = raw.literal_string {
            return Ok(ValueRef::LiteralString(s));
        }
        if let Some(n) = raw.literal_number {
            return Ok(ValueRef::LiteralNumber(n));
        }
        if let Some(b) = raw.literal_boolean {
            return Ok(ValueRef::LiteralBoolean(b));
        }
        if let Some(items) = raw.literal_array {
            return Ok(ValueRef::LiteralArray(items));
        }
        if let Some(path) = raw.path {
            return Ok(ValueRef::Path(path));
        }

        Err(serde::de::Error::custom(
            "value reference needs one of literalString, literalNumber, literalBoolean, literalArray or path",
        ))
    }
}

impl ValueRef {
    /// Create a new literal string value
    pub fn literal(s: impl Into<String>) -> Self {
        ValueRef::LiteralString(s.into())
    }

    /// Create a new path reference
    pub fn path(p: impl Into<String>) -> Self {
        ValueRef::Path(p.into())
    }

    pub fn is_literal(&self) -> bool {
        !self.is_path()
    }

    pub fn is_path(&self) -> bool {
        matches!(self, ValueRef::Path(_))
    }

    /// Get the path if this is a path reference
    pub fn as_path(&self) -> Option<&str> {
        match self {
            ValueRef::Path(path) => Some(path),
            _ => None,
        }
    }
}

impl Default for ValueRef {
    fn default() -> Self {
        ValueRef::literal("")
    }
}
