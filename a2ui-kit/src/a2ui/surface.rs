//! A2UI Surface Registry
//!
//! Owns every known surface (component set, root, styles and data model)
//! and applies incoming messages to them strictly in order.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use super::{
    data_model::DataModel,
    diagnostic::{Diagnostic, InvalidMessage},
    message::*,
};

/// One independently renderable UI tree plus its data model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Surface {
    /// Surface ID
    pub id: String,

    /// Root component ID, set by `beginRendering`
    pub root: Option<String>,

    /// Style configuration
    pub styles: Option<SurfaceStyles>,

    /// Component definitions by ID
    pub components: HashMap<String, ComponentDefinition>,

    /// The surface's data model
    pub data_model: DataModel,

    /// Whether `beginRendering` has been received
    pub rendering_started: bool,
}

impl Surface {
    /// Create a new, empty surface
    pub fn new(id: impl Into<String>) -> Self {
        Surface {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Get a component by ID
    pub fn get_component(&self, id: &str) -> Option<&ComponentDefinition> {
        self.components.get(id)
    }

    /// Get all component IDs
    pub fn component_ids(&self) -> impl Iterator<Item = &String> {
        self.components.keys()
    }
}

/// What applying one message did.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    RenderingStarted {
        surface_id: String,
    },
    ComponentsUpdated {
        surface_id: String,
        component_ids: Vec<String>,
    },
    DataModelUpdated {
        surface_id: String,
        path: String,
    },
    Deleted {
        surface_id: String,
        existed: bool,
    },
}

impl SurfaceEvent {
    pub fn surface_id(&self) -> &str {
        match self {
            SurfaceEvent::RenderingStarted { surface_id }
            | SurfaceEvent::ComponentsUpdated { surface_id, .. }
            | SurfaceEvent::DataModelUpdated { surface_id, .. }
            | SurfaceEvent::Deleted { surface_id, .. } => surface_id,
        }
    }
}

/// Result of applying one valid message.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub event: SurfaceEvent,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of applying a batch of raw messages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    /// One event per applied message, in input order
    pub events: Vec<SurfaceEvent>,

    /// Skipped messages and other non-fatal conditions
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchReport {
    /// Surfaces this batch changed, in first-seen order.
    ///
    /// A `deleteSurface` drops the id; a later message re-adds it at the end.
    pub fn touched_surfaces(&self) -> Vec<String> {
        let mut touched: Vec<String> = Vec::new();
        for event in &self.events {
            match event {
                SurfaceEvent::Deleted { surface_id, .. } => {
                    touched.retain(|id| id != surface_id);
                }
                other => {
                    let surface_id = other.surface_id();
                    if !touched.iter().any(|id| id == surface_id) {
                        touched.push(surface_id.to_string());
                    }
                }
            }
        }
        touched
    }
}

/// Registry of surfaces for one conversation.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = SurfaceRegistry::new();
/// let report = registry.apply_batch(&ingested.messages);
/// let projection = registry.project("main")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    surfaces: IndexMap<String, Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a surface by ID
    pub fn get_surface(&self, surface_id: &str) -> Option<&Surface> {
        self.surfaces.get(surface_id)
    }

    /// Get all surface IDs, in creation order
    pub fn surface_ids(&self) -> impl Iterator<Item = &String> {
        self.surfaces.keys()
    }

    /// Surfaces a renderer should redraw after `report`: every touched
    /// surface that still exists and has received `beginRendering`, whether
    /// in this batch or an earlier one.
    pub fn surfaces_to_project(&self, report: &BatchReport) -> Vec<String> {
        report
            .touched_surfaces()
            .into_iter()
            .filter(|id| {
                self.get_surface(id)
                    .is_some_and(|surface| surface.rendering_started)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Validate and apply one raw message.
    ///
    /// The message must be an object with exactly one action key. Other
    /// top-level keys are ignored.
    pub fn apply_message(&mut self, raw: &Value) -> Result<Applied, InvalidMessage> {
        let message = parse_raw_message(raw)?;
        Ok(self.apply(message))
    }

    /// Apply raw messages in order; invalid ones are skipped and reported.
    pub fn apply_batch(&mut self, messages: &[Value]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, raw) in messages.iter().enumerate() {
            match self.apply_message(raw) {
                Ok(applied) => {
                    report.events.push(applied.event);
                    report.diagnostics.extend(applied.diagnostics);
                }
                Err(err) => {
                    ::log::warn!("[A2UI] Skipping message[{}]: {}", index, err);
                    report.diagnostics.push(Diagnostic::InvalidMessage {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Apply an already-typed message.
    pub fn apply(&mut self, message: A2uiMessage) -> Applied {
        ::log::debug!(
            "[A2UI] Applying {} to surface {}",
            message.action_key(),
            message.surface_id()
        );
        match message {
            A2uiMessage::BeginRendering(msg) => self.apply_begin_rendering(msg),
            A2uiMessage::SurfaceUpdate(msg) => self.apply_surface_update(msg),
            A2uiMessage::DataModelUpdate(msg) => self.apply_data_model_update(msg),
            A2uiMessage::DeleteSurface(msg) => self.apply_delete_surface(msg),
        }
    }

    fn get_or_create(&mut self, surface_id: &str) -> &mut Surface {
        self.surfaces
            .entry(surface_id.to_string())
            .or_insert_with(|| {
                ::log::debug!("[A2UI] Creating surface {}", surface_id);
                Surface::new(surface_id)
            })
    }

    fn apply_begin_rendering(&mut self, msg: BeginRendering) -> Applied {
        let surface = self.get_or_create(&msg.surface_id);
        surface.root = Some(msg.root);
        surface.styles = msg.styles;
        surface.rendering_started = true;

        Applied {
            event: SurfaceEvent::RenderingStarted {
                surface_id: msg.surface_id,
            },
            diagnostics: vec![],
        }
    }

    fn apply_surface_update(&mut self, msg: SurfaceUpdate) -> Applied {
        let surface = self.get_or_create(&msg.surface_id);

        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();
        let mut updated_ids = Vec::new();

        for component in msg.components {
            if !seen.insert(component.id.clone()) {
                ::log::warn!(
                    "[A2UI] Duplicate component '{}' in surfaceUpdate for {}",
                    component.id,
                    msg.surface_id
                );
                diagnostics.push(Diagnostic::DuplicateComponent {
                    surface_id: msg.surface_id.clone(),
                    component_id: component.id.clone(),
                });
            } else {
                updated_ids.push(component.id.clone());
            }
            surface.components.insert(component.id.clone(), component);
        }

        Applied {
            event: SurfaceEvent::ComponentsUpdated {
                surface_id: msg.surface_id,
                component_ids: updated_ids,
            },
            diagnostics,
        }
    }

    fn apply_data_model_update(&mut self, msg: DataModelUpdate) -> Applied {
        let surface = self.get_or_create(&msg.surface_id);
        surface.data_model.apply_updates(&msg.path, &msg.contents);

        Applied {
            event: SurfaceEvent::DataModelUpdated {
                surface_id: msg.surface_id,
                path: msg.path,
            },
            diagnostics: vec![],
        }
    }

    fn apply_delete_surface(&mut self, msg: DeleteSurface) -> Applied {
        let existed = self.surfaces.shift_remove(&msg.surface_id).is_some();
        if !existed {
            ::log::debug!("[A2UI] deleteSurface for unknown surface {}", msg.surface_id);
        }

        Applied {
            event: SurfaceEvent::Deleted {
                surface_id: msg.surface_id,
                existed,
            },
            diagnostics: vec![],
        }
    }
}

/// Check the action-key shape of a raw message and decode it.
pub fn parse_raw_message(raw: &Value) -> Result<A2uiMessage, InvalidMessage> {
    let object = raw.as_object().ok_or(InvalidMessage::NotAnObject)?;

    let keys: Vec<&String> = object
        .keys()
        .filter(|key| ACTION_KEYS.contains(&key.as_str()))
        .collect();

    let key = match keys.as_slice() {
        [] => return Err(InvalidMessage::NoActionKey),
        [key] => *key,
        several => {
            return Err(InvalidMessage::SeveralActionKeys(
                several.iter().map(|k| k.to_string()).collect(),
            ));
        }
    };

    let mut single = Map::new();
    single.insert(key.clone(), object[key].clone());

    serde_json::from_value(Value::Object(single)).map_err(|e| InvalidMessage::Schema {
        action: key.clone(),
        reason: e.to_string(),
    })
}
