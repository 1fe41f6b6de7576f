//! A2UI Data Model
//!
//! Each surface owns one DataModel, addressed with JSON Pointer style paths.
//! Mappings keep insertion order, which is what template expansion iterates.

use serde_json::{Map, Value};

use super::message::{DataContent, DataValue};

/// A per-surface key/value store that components bind to.
///
/// `/` and the empty string address the root. Segments are separated by
/// `/`, with `~1` and `~0` standing for a literal slash and tilde; a numeric
/// segment indexes into an array.
///
/// ```rust,ignore
/// let mut model = DataModel::new();
/// model.set("/cart/total", json!(12.5));
/// assert_eq!(model.get_number("/cart/total"), Some(12.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    /// The root data value, always a mapping
    data: Value,

    /// Bumped on every mutation
    version: u64,
}

impl Default for DataModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DataModel {
    pub fn new() -> Self {
        DataModel {
            data: Value::Object(Map::new()),
            version: 0,
        }
    }

    /// Seeds the model; a non-mapping root is discarded for an empty mapping.
    pub fn with_data(data: Value) -> Self {
        let data = match data {
            Value::Object(_) => data,
            _ => Value::Object(Map::new()),
        };
        DataModel { data, version: 0 }
    }

    /// Mutation counter, for cheap change detection
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        parse_pointer(path)
            .iter()
            .try_fold(&self.data, |node, segment| step(node, segment))
    }

    pub fn get_string(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    pub fn get_number(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(|v| v.as_f64())
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    pub fn get_object(&self, path: &str) -> Option<&Map<String, Value>> {
        self.get(path).and_then(|v| v.as_object())
    }

    /// Set a value at the given path, creating intermediate mappings.
    ///
    /// Returns `false` when the path runs through a scalar or an
    /// out-of-range array index.
    pub fn set(&mut self, path: &str, value: Value) -> bool {
        let segments = parse_pointer(path);
        if segments.is_empty() {
            self.replace(value);
            return true;
        }

        let changed = set_at(&mut self.data, &segments, value);
        if changed {
            self.version += 1;
        }
        changed
    }

    pub fn replace(&mut self, data: Value) {
        self.data = match data {
            Value::Object(_) => data,
            _ => Value::Object(Map::new()),
        };
        self.version += 1;
    }

    /// Apply the contents of a `dataModelUpdate` message.
    ///
    /// At the root (`/` or empty) the whole model is replaced by the mapping
    /// built from `contents`. At any other path each entry replaces the
    /// child `path/key`; siblings not named in `contents` are untouched.
    pub fn apply_updates(&mut self, base_path: &str, contents: &[DataContent]) {
        if is_root(base_path) {
            self.replace(Value::Object(contents_to_map(contents)));
            return;
        }

        let base = base_path.trim_end_matches('/');
        let base = if base.starts_with('/') {
            base.to_string()
        } else {
            format!("/{}", base)
        };

        if contents.is_empty() {
            // Still materialize the target so bindings can see it exists.
            if self.get(&base).is_none() {
                self.set(&base, Value::Object(Map::new()));
            }
            return;
        }

        for content in contents {
            let full_path = format!("{}/{}", base, escape_segment(&content.key));
            if !self.set(&full_path, data_value_to_json(&content.value)) {
                ::log::warn!("[A2UI] Could not write data at {}", full_path);
            }
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.data
    }
}

/// True for the paths that address the model root.
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Join a base path and a relative path into an absolute pointer.
pub fn join_path(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches("./").trim_start_matches('/');
    if relative.is_empty() {
        if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        }
    } else if base.is_empty() {
        format!("/{}", relative)
    } else if base.starts_with('/') {
        format!("{}/{}", base, relative)
    } else {
        format!("/{}/{}", base, relative)
    }
}

/// Escape a mapping key for use as one pointer segment.
pub fn escape_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Convert a wire DataValue into a JSON value.
pub fn data_value_to_json(dv: &DataValue) -> Value {
    match dv {
        DataValue::ValueString(s) => Value::String(s.clone()),
        DataValue::ValueNumber(n) => serde_json::json!(n),
        DataValue::ValueBoolean(b) => Value::Bool(*b),
        DataValue::ValueMap(contents) => Value::Object(contents_to_map(contents)),
        DataValue::ValueArray(items) => Value::Array(items.iter().map(data_value_to_json).collect()),
    }
}

fn contents_to_map(contents: &[DataContent]) -> Map<String, Value> {
    let mut map = Map::new();
    for c in contents {
        map.insert(c.key.clone(), data_value_to_json(&c.value));
    }
    map
}

/// Split a JSON Pointer into unescaped segments.
fn parse_pointer(path: &str) -> Vec<String> {
    if is_root(path) {
        return vec![];
    }

    path.trim_matches('/')
        .split('/')
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

fn set_at(current: &mut Value, segments: &[String], value: Value) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        *current = value;
        return true;
    };

    match current {
        Value::Object(map) => {
            if rest.is_empty() {
                map.insert(segment.clone(), value);
                return true;
            }
            let child = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() && !child.is_array() {
                *child = Value::Object(Map::new());
            }
            set_at(child, rest, value)
        }
        Value::Array(arr) => {
            let Ok(index) = segment.parse::<usize>() else {
                return false;
            };
            if index == arr.len() {
                arr.push(Value::Object(Map::new()));
            }
            match arr.get_mut(index) {
                Some(child) if rest.is_empty() => {
                    *child = value;
                    true
                }
                Some(child) => set_at(child, rest, value),
                None => false,
            }
        }
        _ => false,
    }
}
