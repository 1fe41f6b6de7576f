//! A2UI Binding Resolver
//!
//! Turns value references into concrete values against a data model, and
//! locates the entries a list template expands over.

use serde_json::Value;

use super::{
    data_model::{DataModel, escape_segment, join_path},
    value::ValueRef,
};

/// A concrete value produced from a [`ValueRef`].
///
/// Scalars keep their native type; turning them into display text is the
/// projector's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<Resolved>),
    /// The path did not lead to a scalar or list
    Unresolved,
}

impl Resolved {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Resolved::Unresolved)
    }

    /// Display text for string-typed slots. `Unresolved` becomes empty.
    pub fn to_display_string(&self) -> String {
        match self {
            Resolved::String(s) => s.clone(),
            Resolved::Number(n) => format_number(*n),
            Resolved::Bool(b) => b.to_string(),
            Resolved::List(items) => items
                .iter()
                .map(|item| item.to_display_string())
                .collect::<Vec<_>>()
                .join(", "),
            Resolved::Unresolved => String::new(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Resolved::Number(n) => Some(*n),
            Resolved::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Resolved::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Items as text, for list-typed slots. A scalar becomes one item.
    pub fn to_string_list(&self) -> Vec<String> {
        match self {
            Resolved::List(items) => items.iter().map(|i| i.to_display_string()).collect(),
            Resolved::Unresolved => vec![],
            scalar => vec![scalar.to_display_string()],
        }
    }

    /// Convert back to JSON, `Unresolved` becoming `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Resolved::String(s) => Value::String(s.clone()),
            Resolved::Number(n) => serde_json::json!(n),
            Resolved::Bool(b) => Value::Bool(*b),
            Resolved::List(items) => Value::Array(items.iter().map(|i| i.to_json()).collect()),
            Resolved::Unresolved => Value::Null,
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Resolved::String(s.clone()),
            Value::Number(n) => n.as_f64().map(Resolved::Number).unwrap_or(Resolved::Unresolved),
            Value::Bool(b) => Resolved::Bool(*b),
            Value::Array(items) => Resolved::List(items.iter().map(Resolved::from_json).collect()),
            Value::Object(_) | Value::Null => Resolved::Unresolved,
        }
    }
}

/// Integral numbers print without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Resolve a path with optional scope prefix.
/// - If path starts with `/`, it's absolute (use as-is)
/// - Otherwise, it's relative to the scope, or to the root without one
pub fn absolute_path(path: &str, scope: Option<&str>) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        join_path(scope.unwrap_or(""), path)
    }
}

/// Resolve a value reference against a data model.
///
/// `scope` is the absolute path of the current template entry, if any.
pub fn resolve(value: &ValueRef, model: &DataModel, scope: Option<&str>) -> Resolved {
    match value {
        ValueRef::LiteralString(s) => Resolved::String(s.clone()),
        ValueRef::LiteralNumber(n) => Resolved::Number(*n),
        ValueRef::LiteralBoolean(b) => Resolved::Bool(*b),
        ValueRef::LiteralArray(items) => {
            Resolved::List(items.iter().cloned().map(Resolved::String).collect())
        }
        ValueRef::Path(path) => {
            let full_path = absolute_path(path, scope);
            match model.get(&full_path) {
                Some(found) => Resolved::from_json(found),
                None => Resolved::Unresolved,
            }
        }
    }
}

/// One row of a list template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateEntry {
    /// Mapping key, or the index for array sources
    pub key: String,

    /// Absolute path of the row, used as scope for the instance
    pub scope: String,
}

/// Why a template binding produced no rows.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSourceError {
    /// Nothing exists at the path
    Missing(String),
    /// Something exists but it is a scalar
    NotMapping(String),
}

/// Find the rows a template expands over, in insertion order.
pub fn template_entries(
    data_binding: &str,
    model: &DataModel,
    scope: Option<&str>,
) -> Result<Vec<TemplateEntry>, TemplateSourceError> {
    let base = absolute_path(data_binding, scope);

    let entries = match model.get(&base) {
        Some(Value::Object(map)) => map
            .keys()
            .map(|key| TemplateEntry {
                key: key.clone(),
                scope: join_path(&base, &escape_segment(key)),
            })
            .collect(),
        Some(Value::Array(items)) => (0..items.len())
            .map(|index| TemplateEntry {
                key: index.to_string(),
                scope: join_path(&base, &index.to_string()),
            })
            .collect(),
        Some(_) => return Err(TemplateSourceError::NotMapping(base)),
        None => return Err(TemplateSourceError::Missing(base)),
    };

    Ok(entries)
}
