//! A2UI Render Projector
//!
//! Walks a surface from its root and produces a [`RenderTree`]. Component
//! references are looked up in the surface's flat component map, so the walk
//! carries its own cycle guard, a depth bound and a node budget. A component
//! referenced from several places is shared, not cyclic, so only the budget
//! stops a graph that fans out at every level.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::{
    catalog::ComponentTag,
    diagnostic::{Diagnostic, SurfaceNotRenderable},
    message::*,
    render::*,
    resolver::{Resolved, TemplateSourceError, absolute_path, resolve, template_entries},
    surface::{Surface, SurfaceRegistry},
    value::ValueRef,
};

/// Maximum nesting of component references followed in one projection.
pub const MAX_DEPTH: usize = 64;

/// Maximum number of nodes one projection may produce.
pub const MAX_NODES: usize = 10_000;

/// A render tree plus everything that degraded along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub tree: RenderTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Project a surface into a render tree.
///
/// Fails only when the surface cannot be rendered at all: it has not
/// received `beginRendering`, or its root is not defined.
pub fn project(surface: &Surface) -> Result<Projection, SurfaceNotRenderable> {
    if !surface.rendering_started {
        return Err(SurfaceNotRenderable::NotStarted(surface.id.clone()));
    }

    let root_id = surface.root.clone().unwrap_or_default();
    if surface.get_component(&root_id).is_none() {
        return Err(SurfaceNotRenderable::MissingRoot {
            surface_id: surface.id.clone(),
            root: root_id,
        });
    }

    let mut projector = Projector {
        surface,
        stack: Vec::new(),
        current_scope: None,
        id_suffix: String::new(),
        nodes: 0,
        budget_spent: false,
        used_ids: HashSet::new(),
        repeat_counters: HashMap::new(),
        diagnostics: Vec::new(),
    };
    let root = projector.project_component(&root_id, &root_id);

    ::log::debug!(
        "[A2UI] Projected surface {} with {} diagnostics",
        surface.id,
        projector.diagnostics.len()
    );

    Ok(Projection {
        tree: RenderTree {
            surface_id: surface.id.clone(),
            styles: surface.styles.clone(),
            root,
        },
        diagnostics: projector.diagnostics,
    })
}

impl SurfaceRegistry {
    /// Project a surface by id.
    pub fn project(&self, surface_id: &str) -> Result<Projection, SurfaceNotRenderable> {
        let surface = self
            .get_surface(surface_id)
            .ok_or_else(|| SurfaceNotRenderable::UnknownSurface(surface_id.to_string()))?;
        project(surface)
    }
}

struct Projector<'a> {
    surface: &'a Surface,

    /// Component ids on the active resolution path
    stack: Vec<&'a str>,

    /// Absolute data path of the current template entry.
    /// When rendering inside a template, this is set to the item path
    /// (e.g., "/items/item1").
    current_scope: Option<String>,

    /// `[key]` segments of every enclosing template instance
    id_suffix: String,

    /// Nodes counted against `MAX_NODES`
    nodes: usize,
    budget_spent: bool,

    used_ids: HashSet<String>,

    /// Last `#n` handed out per repeated base id
    repeat_counters: HashMap<String, usize>,

    diagnostics: Vec<Diagnostic>,
}

impl<'a> Projector<'a> {
    fn surface_id(&self) -> String {
        self.surface.id.clone()
    }

    /// A node id not yet used in this projection.
    ///
    /// The first node for a base id keeps it; later ones, from a component
    /// referenced more than once, become `base#1`, `base#2` in walk order.
    fn unique_id(&mut self, base: String) -> String {
        if self.used_ids.insert(base.clone()) {
            return base;
        }
        let counter = self.repeat_counters.entry(base.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}#{}", base, counter);
            if self.used_ids.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    fn project_component(&mut self, component_id: &str, parent_id: &str) -> RenderNode {
        if self.nodes >= MAX_NODES {
            if !self.budget_spent {
                self.budget_spent = true;
                ::log::warn!(
                    "[A2UI] Surface {} exceeds {} nodes, cutting at {}",
                    self.surface.id,
                    MAX_NODES,
                    component_id
                );
                self.diagnostics.push(Diagnostic::NodeLimit {
                    surface_id: self.surface_id(),
                    component_id: component_id.to_string(),
                    limit: MAX_NODES,
                });
            }
            let node_id = self.unique_id(format!("{}{}", component_id, self.id_suffix));
            return placeholder(node_id, component_id, PlaceholderReason::NodeLimit);
        }
        self.nodes += 1;

        let node_id = self.unique_id(format!("{}{}", component_id, self.id_suffix));

        let Some((key, definition)) = self.surface.components.get_key_value(component_id) else {
            ::log::debug!("[A2UI] Dangling reference {} -> {}", parent_id, component_id);
            self.diagnostics.push(Diagnostic::DanglingReference {
                surface_id: self.surface_id(),
                parent_id: parent_id.to_string(),
                component_id: component_id.to_string(),
            });
            return placeholder(node_id, component_id, PlaceholderReason::BrokenReference);
        };

        if self.stack.contains(&key.as_str()) {
            ::log::debug!("[A2UI] Cycle at component {}", component_id);
            self.diagnostics.push(Diagnostic::Cycle {
                surface_id: self.surface_id(),
                component_id: component_id.to_string(),
            });
            return placeholder(node_id, component_id, PlaceholderReason::Cycle);
        }

        if self.stack.len() >= MAX_DEPTH {
            self.diagnostics.push(Diagnostic::DepthLimit {
                surface_id: self.surface_id(),
                component_id: component_id.to_string(),
                depth: MAX_DEPTH,
            });
            return placeholder(node_id, component_id, PlaceholderReason::DepthLimit);
        }

        self.stack.push(key.as_str());
        let mut node = RenderNode::new(
            node_id,
            component_id,
            NodeKind::Component(definition.component.tag()),
        );
        self.fill_node(&mut node, &definition.component);
        self.stack.pop();

        node
    }

    fn fill_node(&mut self, node: &mut RenderNode, component: &'a ComponentType) {
        match component {
            ComponentType::Column(col) => {
                set_enum(node, "alignment", &col.alignment);
                set_enum(node, "distribution", &col.distribution);
                node.children = self.project_children(&node.component_id, ComponentTag::Column, &col.children);
            }
            ComponentType::Row(row) => {
                set_enum(node, "alignment", &row.alignment);
                set_enum(node, "distribution", &row.distribution);
                node.children = self.project_children(&node.component_id, ComponentTag::Row, &row.children);
            }
            ComponentType::List(list) => {
                set_enum(node, "direction", &list.direction);
                set_enum(node, "alignment", &list.alignment);
                node.children = self.project_children(&node.component_id, ComponentTag::List, &list.children);
            }
            ComponentType::Card(card) => {
                node.children = vec![self.project_component(&card.child, &node.component_id)];
            }
            ComponentType::Tabs(tabs) => {
                let scope = self.current_scope.clone();
                let mut titles = Vec::with_capacity(tabs.tab_items.len());
                for item in &tabs.tab_items {
                    titles.push(self.resolve_text(node, scope.as_deref(), &item.title));
                    let child = self.project_component(&item.child, &node.component_id);
                    node.children.push(child);
                }
                node.properties
                    .insert("tabTitles".into(), PropValue::TextList(titles));
            }
            ComponentType::Modal(modal) => {
                // Entry point first, content second.
                let entry = self.project_component(&modal.entry_point_child, &node.component_id);
                let content = self.project_component(&modal.content_child, &node.component_id);
                node.children = vec![entry, content];
            }
            ComponentType::Divider(divider) => {
                set_enum(node, "axis", &divider.axis);
            }
            ComponentType::Heading(heading) => {
                self.set_text(node, "text", &heading.text);
                if let Some(level) = &heading.level {
                    node.properties
                        .insert("level".into(), PropValue::Text(level.clone()));
                }
            }
            ComponentType::Text(text) => {
                self.set_text(node, "text", &text.text);
                set_enum(node, "usageHint", &text.usage_hint);
            }
            ComponentType::Image(image) => {
                self.set_text(node, "url", &image.url);
                set_enum(node, "fit", &image.fit);
                set_enum(node, "usageHint", &image.usage_hint);
            }
            ComponentType::Icon(icon) => {
                self.set_text(node, "name", &icon.name);
            }
            ComponentType::Video(video) => {
                self.set_text(node, "url", &video.url);
            }
            ComponentType::AudioPlayer(audio) => {
                self.set_text(node, "url", &audio.url);
                if let Some(description) = &audio.description {
                    self.set_text(node, "description", description);
                }
            }
            ComponentType::Button(button) => {
                if let Some(primary) = button.primary {
                    node.properties
                        .insert("primary".into(), PropValue::Bool(primary));
                }
                if let Some(action) = &button.action {
                    let resolved = self.resolve_action(action);
                    node.properties
                        .insert("action".into(), PropValue::Action(resolved));
                }
                node.children = vec![self.project_component(&button.child, &node.component_id)];
            }
            ComponentType::CheckBox(checkbox) => {
                self.set_text(node, "label", &checkbox.label);
                self.set_value(node, "value", &checkbox.value);
            }
            ComponentType::TextField(field) => {
                self.set_text(node, "label", &field.label);
                if let Some(text) = &field.text {
                    self.set_text(node, "text", text);
                }
                set_enum(node, "textFieldType", &field.text_field_type);
                if let Some(regexp) = &field.validation_regexp {
                    node.properties
                        .insert("validationRegexp".into(), PropValue::Text(regexp.clone()));
                }
            }
            ComponentType::DateTimeInput(input) => {
                self.set_text(node, "value", &input.value);
                if let Some(enable_date) = input.enable_date {
                    node.properties
                        .insert("enableDate".into(), PropValue::Bool(enable_date));
                }
                if let Some(enable_time) = input.enable_time {
                    node.properties
                        .insert("enableTime".into(), PropValue::Bool(enable_time));
                }
                if let Some(format) = &input.output_format {
                    node.properties
                        .insert("outputFormat".into(), PropValue::Text(format.clone()));
                }
            }
            ComponentType::MultipleChoice(choice) => {
                let selections = self.resolve_bound(node, "selections", &choice.selections);
                node.properties.insert(
                    "selections".into(),
                    PropValue::TextList(selections.to_string_list()),
                );

                let scope = self.current_scope.clone();
                let mut options = Vec::with_capacity(choice.options.len());
                for option in &choice.options {
                    options.push(ResolvedOption {
                        label: self.resolve_text(node, scope.as_deref(), &option.label),
                        value: option.value.clone(),
                    });
                }
                node.properties
                    .insert("options".into(), PropValue::Options(options));

                if let Some(max) = choice.max_allowed_selections {
                    node.properties
                        .insert("maxAllowedSelections".into(), PropValue::Number(max as f64));
                }
            }
            ComponentType::Slider(slider) => {
                self.set_value(node, "value", &slider.value);
                if let Some(min) = slider.min_value {
                    node.properties.insert("minValue".into(), PropValue::Number(min));
                }
                if let Some(max) = slider.max_value {
                    node.properties.insert("maxValue".into(), PropValue::Number(max));
                }
            }
        }
    }

    fn project_children(
        &mut self,
        parent_id: &str,
        parent_tag: ComponentTag,
        children: &'a ChildrenRef,
    ) -> Vec<RenderNode> {
        let mut nodes = Vec::new();

        match children {
            ChildrenRef::ExplicitList(ids) => {
                for child_id in ids {
                    let node = self.project_component(child_id, parent_id);
                    nodes.push(node);
                }
            }
            ChildrenRef::Template {
                component_id,
                data_binding,
            } => {
                let entries = match template_entries(
                    data_binding,
                    &self.surface.data_model,
                    self.current_scope.as_deref(),
                ) {
                    Ok(entries) => entries,
                    Err(TemplateSourceError::Missing(path)) => {
                        ::log::debug!("[A2UI] Template source {} is missing", path);
                        self.diagnostics.push(Diagnostic::UnresolvedBinding {
                            surface_id: self.surface_id(),
                            node_id: format!("{}{}", parent_id, self.id_suffix),
                            path,
                        });
                        vec![]
                    }
                    Err(TemplateSourceError::NotMapping(path)) => {
                        self.diagnostics.push(Diagnostic::TemplateSourceNotMapping {
                            surface_id: self.surface_id(),
                            component_id: component_id.clone(),
                            path,
                        });
                        vec![]
                    }
                };

                for entry in entries {
                    // Save the enclosing scope and set the entry's
                    let previous_scope = self.current_scope.replace(entry.scope);
                    let previous_len = self.id_suffix.len();
                    self.id_suffix.push_str(&format!("[{}]", entry.key));

                    let node = self.project_component(component_id, parent_id);
                    nodes.push(node);

                    self.id_suffix.truncate(previous_len);
                    self.current_scope = previous_scope;
                }
            }
        }

        if parent_tag.honors_child_weight() {
            for node in &mut nodes {
                node.weight = self
                    .surface
                    .get_component(&node.component_id)
                    .and_then(|def| def.weight);
            }
        }

        nodes
    }

    /// Resolve a reference and record its binding path on the node.
    fn resolve_bound(&mut self, node: &mut RenderNode, name: &str, value: &ValueRef) -> Resolved {
        let scope = self.current_scope.clone();
        let resolved = resolve(value, &self.surface.data_model, scope.as_deref());

        if let Some(path) = value.as_path() {
            let full_path = absolute_path(path, scope.as_deref());
            if resolved.is_unresolved() {
                ::log::debug!("[A2UI] Unresolved binding {} on {}", full_path, node.id);
                self.diagnostics.push(Diagnostic::UnresolvedBinding {
                    surface_id: self.surface_id(),
                    node_id: node.id.clone(),
                    path: full_path.clone(),
                });
            }
            node.bindings.insert(name.to_string(), full_path);
        }

        resolved
    }

    fn resolve_text(&mut self, node: &RenderNode, scope: Option<&str>, value: &ValueRef) -> String {
        let resolved = resolve(value, &self.surface.data_model, scope);
        if resolved.is_unresolved() {
            if let Some(path) = value.as_path() {
                self.diagnostics.push(Diagnostic::UnresolvedBinding {
                    surface_id: self.surface_id(),
                    node_id: node.id.clone(),
                    path: absolute_path(path, scope),
                });
            }
        }
        resolved.to_display_string()
    }

    /// String-typed slot: stringified, empty when unresolved.
    fn set_text(&mut self, node: &mut RenderNode, name: &str, value: &ValueRef) {
        let resolved = self.resolve_bound(node, name, value);
        node.properties
            .insert(name.to_string(), PropValue::Text(resolved.to_display_string()));
    }

    /// Native-typed slot: omitted when unresolved.
    fn set_value(&mut self, node: &mut RenderNode, name: &str, value: &ValueRef) {
        let prop = match self.resolve_bound(node, name, value) {
            Resolved::String(s) => PropValue::Text(s),
            Resolved::Number(n) => PropValue::Number(n),
            Resolved::Bool(b) => PropValue::Bool(b),
            list @ Resolved::List(_) => PropValue::TextList(list.to_string_list()),
            Resolved::Unresolved => return,
        };
        node.properties.insert(name.to_string(), prop);
    }

    fn resolve_action(&self, action: &ActionDefinition) -> ResolvedAction {
        let scope = self.current_scope.as_deref();
        let mut context = IndexMap::new();

        for item in &action.context {
            if item.key.is_empty() {
                continue;
            }
            let value = resolve(&item.value, &self.surface.data_model, scope);
            context.insert(item.key.clone(), value.to_json());
        }

        ResolvedAction {
            name: action.name.clone(),
            context,
        }
    }
}

fn placeholder(node_id: String, component_id: &str, reason: PlaceholderReason) -> RenderNode {
    RenderNode::new(node_id, component_id, NodeKind::Placeholder(reason))
}

/// Store a wire enum under its serialized name.
///
/// Values that only matched the `Unknown` fallback are left out.
fn set_enum<T: Serialize>(node: &mut RenderNode, name: &str, value: &Option<T>) {
    let Some(value) = value else {
        return;
    };
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) if s != "unknown" => {
            node.properties.insert(name.to_string(), PropValue::Text(s));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::collections::HashSet;

    fn registry(messages: Value) -> SurfaceRegistry {
        let mut registry = SurfaceRegistry::new();
        let Value::Array(messages) = messages else {
            panic!("expected an array of messages");
        };
        let report = registry.apply_batch(&messages);
        assert!(
            report
                .diagnostics
                .iter()
                .all(|d| !matches!(d, Diagnostic::InvalidMessage { .. })),
            "fixture has invalid messages: {:?}",
            report.diagnostics
        );
        registry
    }

    fn child_ids(node: &RenderNode) -> Vec<&str> {
        node.children.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_single_text_node() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "r"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "r", "component": {"Text": {"text": {"literalString": "hi"}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let root = &projection.tree.root;
        assert_eq!(root.tag(), Some(ComponentTag::Text));
        assert_eq!(root.text("text"), Some("hi"));
        assert!(root.children.is_empty());
        assert!(projection.diagnostics.is_empty());
    }

    #[test]
    fn test_not_renderable() {
        let mut registry = registry(json!([
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "r", "component": {"Text": {"text": {"literalString": "hi"}}}}
            ]}}
        ]));

        assert_eq!(
            registry.project("missing"),
            Err(SurfaceNotRenderable::UnknownSurface("missing".into()))
        );
        assert_eq!(
            registry.project("s"),
            Err(SurfaceNotRenderable::NotStarted("s".into()))
        );

        registry
            .apply_message(&json!({"beginRendering": {"surfaceId": "s", "root": "nope"}}))
            .unwrap();
        assert_eq!(
            registry.project("s"),
            Err(SurfaceNotRenderable::MissingRoot {
                surface_id: "s".into(),
                root: "nope".into()
            })
        );
    }

    #[test]
    fn test_cycle_yields_placeholder() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "a"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "a", "component": {"Column": {"children": {"explicitList": ["b"]}}}},
                {"id": "b", "component": {"Column": {"children": {"explicitList": ["a"]}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let b = &projection.tree.root.children[0];
        let recurrence = &b.children[0];
        assert_eq!(recurrence.kind, NodeKind::Placeholder(PlaceholderReason::Cycle));
        assert_eq!(recurrence.component_id, "a");
        assert_eq!(
            projection.diagnostics,
            vec![Diagnostic::Cycle {
                surface_id: "s".into(),
                component_id: "a".into()
            }]
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "card"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "card", "component": {"Card": {"child": "card"}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        assert!(projection.tree.root.children[0].is_placeholder());
    }

    #[test]
    fn test_shared_child_is_not_a_cycle() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "root"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "root", "component": {"Row": {"children": {"explicitList": ["label", "label"]}}}},
                {"id": "label", "component": {"Text": {"text": {"literalString": "x"}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        assert!(projection.tree.root.children.iter().all(|c| !c.is_placeholder()));
        assert_eq!(child_ids(&projection.tree.root), vec!["label", "label#1"]);
        assert!(projection.diagnostics.is_empty());
    }

    #[test]
    fn test_repeated_subtrees_get_distinct_ids() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "root"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "root", "component": {"Column": {"children": {"explicitList": ["pair", "pair"]}}}},
                {"id": "pair", "component": {"Row": {"children": {"explicitList": ["cell", "cell"]}}}},
                {"id": "cell", "component": {"Text": {"text": {"literalString": "x"}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let ids: Vec<&str> = projection
            .tree
            .root
            .walk()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        let distinct: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 7);
        assert_eq!(distinct.len(), 7);

        let root = &projection.tree.root;
        assert_eq!(child_ids(&root.children[0]), vec!["cell", "cell#1"]);
        assert_eq!(root.children[1].id, "pair#1");
        assert_eq!(child_ids(&root.children[1]), vec!["cell#2", "cell#3"]);

        // Same data, same ids.
        assert_eq!(registry.project("s").unwrap(), projection);
    }

    #[test]
    fn test_fan_out_is_cut_at_node_limit() {
        // Each level references the next one twice: no cycle, but the
        // unrolled tree would have 2^17 - 1 nodes.
        let levels = 16;
        let mut components = Vec::new();
        for i in 0..levels {
            let next = format!("c{}", i + 1);
            components.push(json!({
                "id": format!("c{}", i),
                "component": {"Row": {"children": {"explicitList": [next, next]}}}
            }));
        }
        components.push(json!({
            "id": format!("c{}", levels),
            "component": {"Text": {"text": {"literalString": "leaf"}}}
        }));
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "c0"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": components}}
        ]));

        let projection = registry.project("s").unwrap();
        let nodes = projection.tree.root.walk();
        let real = nodes.iter().filter(|n| !n.is_placeholder()).count();
        let cut = nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Placeholder(PlaceholderReason::NodeLimit))
            .count();

        assert_eq!(real, MAX_NODES);
        assert!(cut > 0);
        assert!(nodes.len() <= 3 * MAX_NODES);

        let limits: Vec<&Diagnostic> = projection
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::NodeLimit { .. }))
            .collect();
        assert_eq!(limits.len(), 1);
        assert!(matches!(
            limits[0],
            Diagnostic::NodeLimit { limit, surface_id, .. } if *limit == MAX_NODES && surface_id == "s"
        ));
    }

    #[test]
    fn test_unknown_enum_values_are_left_out() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "row"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "row", "component": {"Row": {"alignment": "baseline", "distribution": "spaceBetween", "children": {"explicitList": []}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let row = &projection.tree.root;
        assert_eq!(row.prop("alignment"), None);
        assert_eq!(row.text("distribution"), Some("spaceBetween"));
    }

    #[test]
    fn test_dangling_child_yields_placeholder_and_diagnostic() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "root"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "root", "component": {"Column": {"children": {"explicitList": ["ok", "ghost"]}}}},
                {"id": "ok", "component": {"Text": {"text": {"literalString": "fine"}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let children = &projection.tree.root.children;
        assert_eq!(children[0].text("text"), Some("fine"));
        assert_eq!(
            children[1].kind,
            NodeKind::Placeholder(PlaceholderReason::BrokenReference)
        );
        assert_eq!(
            projection.diagnostics,
            vec![Diagnostic::DanglingReference {
                surface_id: "s".into(),
                parent_id: "root".into(),
                component_id: "ghost".into()
            }]
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut components = Vec::new();
        for i in 0..(MAX_DEPTH + 5) {
            components.push(json!({
                "id": format!("c{}", i),
                "component": {"Card": {"child": format!("c{}", i + 1)}}
            }));
        }
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "c0"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": components}}
        ]));

        let projection = registry.project("s").unwrap();
        assert!(projection
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::DepthLimit { depth, .. } if *depth == MAX_DEPTH)));
        let placeholders = projection
            .tree
            .root
            .walk()
            .into_iter()
            .filter(|n| n.kind == NodeKind::Placeholder(PlaceholderReason::DepthLimit))
            .count();
        assert_eq!(placeholders, 1);
    }

    fn restaurant_list() -> SurfaceRegistry {
        registry(json!([
            {"beginRendering": {"surfaceId": "default", "root": "root-column"}},
            {"surfaceUpdate": {"surfaceId": "default", "components": [
                {"id": "root-column", "component": {"Column": {"children": {"explicitList": ["title", "item-list"]}}}},
                {"id": "title", "component": {"Text": {"usageHint": "h1", "text": {"path": "title"}}}},
                {"id": "item-list", "component": {"List": {"direction": "vertical", "children": {"template": {"componentId": "item-card", "dataBinding": "/items"}}}}},
                {"id": "item-card", "component": {"Card": {"child": "card-row"}}},
                {"id": "card-row", "component": {"Row": {"children": {"explicitList": ["name", "book"]}}}},
                {"id": "name", "weight": 2, "component": {"Text": {"text": {"path": "name"}}}},
                {"id": "book", "weight": 1, "component": {"Button": {"child": "book-text", "primary": true, "action": {
                    "name": "book_restaurant",
                    "context": [
                        {"key": "restaurantName", "value": {"path": "name"}},
                        {"key": "rating", "value": {"path": "rating"}},
                        {"key": "source", "value": {"literalString": "list"}}
                    ]
                }}}},
                {"id": "book-text", "component": {"Text": {"text": {"literalString": "Book"}}}}
            ]}},
            {"dataModelUpdate": {"surfaceId": "default", "path": "/", "contents": [
                {"key": "title", "valueString": "Top Restaurants"},
                {"key": "items", "valueMap": [
                    {"key": "zulu", "valueMap": [
                        {"key": "name", "valueString": "Xi'an Famous Foods"},
                        {"key": "rating", "valueNumber": 4.8}
                    ]},
                    {"key": "alpha", "valueMap": [
                        {"key": "name", "valueString": "Han Dynasty"},
                        {"key": "rating", "valueNumber": 4.5}
                    ]}
                ]}
            ]}}
        ]))
    }

    #[test]
    fn test_template_expands_in_insertion_order() {
        let registry = restaurant_list();
        let projection = registry.project("default").unwrap();
        let list = &projection.tree.root.children[1];

        assert_eq!(child_ids(list), vec!["item-card[zulu]", "item-card[alpha]"]);

        let first_row = &list.children[0].children[0];
        assert_eq!(first_row.id, "card-row[zulu]");
        assert_eq!(first_row.children[0].text("text"), Some("Xi'an Famous Foods"));
        assert_eq!(
            list.children[1].children[0].children[0].text("text"),
            Some("Han Dynasty")
        );
        assert!(projection.diagnostics.is_empty());
    }

    #[test]
    fn test_template_ids_are_stable() {
        let registry = restaurant_list();
        let first = registry.project("default").unwrap();
        let second = registry.project("default").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_relative_binding_outside_template_uses_root() {
        let registry = restaurant_list();
        let projection = registry.project("default").unwrap();
        let title = &projection.tree.root.children[0];
        assert_eq!(title.text("text"), Some("Top Restaurants"));
        assert_eq!(title.bindings.get("text").map(String::as_str), Some("/title"));
    }

    #[test]
    fn test_action_context_resolves_in_template_scope() {
        let registry = restaurant_list();
        let projection = registry.project("default").unwrap();
        let book = projection.tree.root.find("book[alpha]").unwrap();

        let Some(PropValue::Action(action)) = book.prop("action") else {
            panic!("expected an action on the button");
        };
        assert_eq!(action.name, "book_restaurant");
        assert_eq!(action.context["restaurantName"], json!("Han Dynasty"));
        assert_eq!(action.context["rating"], json!(4.5));
        assert_eq!(action.context["source"], json!("list"));
        assert_eq!(book.prop("primary"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn test_weight_only_on_row_and_column_children() {
        let registry = restaurant_list();
        let projection = registry.project("default").unwrap();
        let list = &projection.tree.root.children[1];

        // List children never carry weight.
        assert!(list.children.iter().all(|c| c.weight.is_none()));

        let row = &list.children[0].children[0];
        assert_eq!(row.children[0].weight, Some(2.0));
        assert_eq!(row.children[1].weight, Some(1.0));
    }

    #[test]
    fn test_weight_ignored_outside_row_and_column() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "card"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "card", "component": {"Card": {"child": "body"}}},
                {"id": "body", "weight": 3, "component": {"Text": {"text": {"literalString": "x"}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        assert_eq!(projection.tree.root.children[0].weight, None);
        assert!(projection.diagnostics.is_empty());
    }

    #[test]
    fn test_nested_templates_compose_ids() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "groups"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "groups", "component": {"Column": {"children": {"template": {"componentId": "group", "dataBinding": "/groups"}}}}},
                {"id": "group", "component": {"List": {"children": {"template": {"componentId": "member", "dataBinding": "members"}}}}},
                {"id": "member", "component": {"Text": {"text": {"path": "name"}}}}
            ]}},
            {"dataModelUpdate": {"surfaceId": "s", "contents": [
                {"key": "groups", "valueMap": [
                    {"key": "g1", "valueMap": [
                        {"key": "members", "valueMap": [
                            {"key": "m1", "valueMap": [{"key": "name", "valueString": "Ann"}]},
                            {"key": "m2", "valueMap": [{"key": "name", "valueString": "Ben"}]}
                        ]}
                    ]}
                ]}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let group = &projection.tree.root.children[0];
        assert_eq!(group.id, "group[g1]");
        assert_eq!(child_ids(group), vec!["member[g1][m1]", "member[g1][m2]"]);
        assert_eq!(group.children[1].text("text"), Some("Ben"));
    }

    #[test]
    fn test_unresolved_binding_degrades_to_empty_text() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "r"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "r", "component": {"Text": {"text": {"path": "/missing/name"}}}}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        assert_eq!(projection.tree.root.text("text"), Some(""));
        assert_eq!(
            projection.diagnostics,
            vec![Diagnostic::UnresolvedBinding {
                surface_id: "s".into(),
                node_id: "r".into(),
                path: "/missing/name".into()
            }]
        );
    }

    #[test]
    fn test_template_over_scalar_is_diagnosed() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "list"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "list", "component": {"List": {"children": {"template": {"componentId": "row", "dataBinding": "/title"}}}}},
                {"id": "row", "component": {"Text": {"text": {"path": "name"}}}}
            ]}},
            {"dataModelUpdate": {"surfaceId": "s", "contents": [{"key": "title", "valueString": "x"}]}}
        ]));

        let projection = registry.project("s").unwrap();
        assert!(projection.tree.root.children.is_empty());
        assert!(matches!(
            projection.diagnostics.as_slice(),
            [Diagnostic::TemplateSourceNotMapping { path, .. }] if path == "/title"
        ));
    }

    #[test]
    fn test_number_in_text_slot_is_stringified() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "r"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "r", "component": {"Column": {"children": {"explicitList": ["rating", "volume"]}}}},
                {"id": "rating", "component": {"Text": {"text": {"path": "rating"}}}},
                {"id": "volume", "component": {"Slider": {"value": {"path": "/volume"}, "minValue": 0, "maxValue": 10}}}
            ]}},
            {"dataModelUpdate": {"surfaceId": "s", "contents": [
                {"key": "rating", "valueNumber": 4.8},
                {"key": "volume", "valueNumber": 7}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let root = &projection.tree.root;
        assert_eq!(root.children[0].text("text"), Some("4.8"));
        assert_eq!(root.children[1].prop("value"), Some(&PropValue::Number(7.0)));
        assert_eq!(root.children[1].prop("maxValue"), Some(&PropValue::Number(10.0)));
    }

    #[test]
    fn test_form_components() {
        let registry = registry(json!([
            {"beginRendering": {"surfaceId": "s", "root": "form"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "form", "component": {"Tabs": {"tabItems": [
                    {"title": {"literalString": "Details"}, "child": "fields"},
                    {"title": {"path": "/labels/more"}, "child": "dialog"}
                ]}}},
                {"id": "fields", "component": {"Column": {"alignment": "stretch", "children": {"explicitList": ["name", "agree", "pick"]}}}},
                {"id": "name", "component": {"TextField": {"label": {"literalString": "Name"}, "text": {"path": "/form/name"}, "textFieldType": "shortText"}}},
                {"id": "agree", "component": {"CheckBox": {"label": {"literal": "Agree"}, "value": {"path": "/form/agree"}}}},
                {"id": "pick", "component": {"MultipleChoice": {"selections": {"path": "/form/picks"}, "options": [
                    {"label": {"literalString": "Red"}, "value": "red"}
                ]}}},
                {"id": "dialog", "component": {"Modal": {"entryPointChild": "open", "contentChild": "body"}}},
                {"id": "open", "component": {"Text": {"text": {"literalString": "Open"}}}},
                {"id": "body", "component": {"Divider": {}}}
            ]}},
            {"dataModelUpdate": {"surfaceId": "s", "contents": [
                {"key": "labels", "valueMap": [{"key": "more", "valueString": "More"}]},
                {"key": "form", "valueMap": [
                    {"key": "name", "valueString": "Ann"},
                    {"key": "agree", "valueBoolean": true},
                    {"key": "picks", "valueArray": [{"valueString": "red"}]}
                ]}
            ]}}
        ]));

        let projection = registry.project("s").unwrap();
        let root = &projection.tree.root;
        assert_eq!(
            root.prop("tabTitles"),
            Some(&PropValue::TextList(vec!["Details".into(), "More".into()]))
        );

        let fields = &root.children[0];
        assert_eq!(fields.text("alignment"), Some("stretch"));
        assert_eq!(fields.children[0].text("text"), Some("Ann"));
        assert_eq!(fields.children[0].text("textFieldType"), Some("shortText"));
        assert_eq!(fields.children[0].bindings["text"], "/form/name");
        assert_eq!(fields.children[1].prop("value"), Some(&PropValue::Bool(true)));
        assert_eq!(
            fields.children[2].prop("selections"),
            Some(&PropValue::TextList(vec!["red".into()]))
        );

        let dialog = &root.children[1];
        assert_eq!(child_ids(dialog), vec!["open", "body"]);
        assert!(projection.diagnostics.is_empty());
    }
}
