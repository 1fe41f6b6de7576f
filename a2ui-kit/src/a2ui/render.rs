//! A2UI Render Tree
//!
//! The binding-free output of projection. A renderer draws from this tree
//! without ever looking at the data model.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::{catalog::ComponentTag, message::SurfaceStyles, message::UserAction};

/// A fully projected surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub surface_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<SurfaceStyles>,

    pub root: RenderNode,
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Component(ComponentTag),
    Placeholder(PlaceholderReason),
}

/// Why a placeholder replaced a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceholderReason {
    /// The referenced component is not defined
    BrokenReference,
    /// The component is already being resolved higher up
    Cycle,
    /// The recursion bound was reached
    DepthLimit,
    /// The projection ran out of its node budget
    NodeLimit,
}

/// One resolved component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    /// Identity that is stable across projections of unchanged data.
    /// Equal to `component_id` outside templates; template instances get
    /// `"{component_id}[{key}]"`, one bracket per enclosing template.
    pub id: String,

    /// The component definition this node came from
    pub component_id: String,

    pub kind: NodeKind,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropValue>,

    /// Absolute data paths of path-bound properties, for two-way binding
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub bindings: IndexMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,

    /// Flex weight, only set on direct children of Row/Column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl RenderNode {
    pub fn new(id: impl Into<String>, component_id: impl Into<String>, kind: NodeKind) -> Self {
        RenderNode {
            id: id.into(),
            component_id: component_id.into(),
            kind,
            properties: IndexMap::new(),
            bindings: IndexMap::new(),
            children: Vec::new(),
            weight: None,
        }
    }

    pub fn tag(&self) -> Option<ComponentTag> {
        match self.kind {
            NodeKind::Component(tag) => Some(tag),
            NodeKind::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder(_))
    }

    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.properties.get(name)
    }

    /// Text of a string-typed property
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.properties.get(name)? {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Depth-first search by node id
    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// All nodes in depth-first order, this one first
    pub fn walk(&self) -> Vec<&RenderNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            nodes.extend(child.walk());
        }
        nodes
    }
}

/// A resolved property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Number(f64),
    Bool(bool),
    TextList(Vec<String>),
    Options(Vec<ResolvedOption>),
    Action(ResolvedAction),
}

/// A MultipleChoice option with its label resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOption {
    pub label: String,
    pub value: String,
}

/// A Button action whose context was resolved in the button's scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAction {
    pub name: String,
    pub context: IndexMap<String, Value>,
}

impl ResolvedAction {
    /// Build the event a client sends when this action fires.
    pub fn to_user_action(&self, surface_id: &str, component_id: &str) -> UserAction {
        UserAction {
            name: self.name.clone(),
            surface_id: surface_id.to_string(),
            source_component_id: Some(component_id.to_string()),
            timestamp: None,
            context: self.context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serialization_skips_empty_fields() {
        let mut node = RenderNode::new("title", "title", NodeKind::Component(ComponentTag::Text));
        node.properties
            .insert("text".into(), PropValue::Text("Hello".into()));

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({
                "id": "title",
                "componentId": "title",
                "kind": {"component": "Text"},
                "properties": {"text": "Hello"}
            })
        );
    }

    #[test]
    fn test_find_and_walk() {
        let mut root = RenderNode::new("root", "root", NodeKind::Component(ComponentTag::Column));
        root.children.push(RenderNode::new(
            "ghost",
            "ghost",
            NodeKind::Placeholder(PlaceholderReason::BrokenReference),
        ));

        assert!(root.find("ghost").unwrap().is_placeholder());
        assert_eq!(root.walk().len(), 2);
        assert_eq!(root.tag(), Some(ComponentTag::Column));
    }

    #[test]
    fn test_action_to_user_action() {
        let mut context = IndexMap::new();
        context.insert("item".to_string(), Value::String("Pizza".into()));
        let action = ResolvedAction {
            name: "order".into(),
            context,
        };

        let user_action = action.to_user_action("main", "buy[item1]");
        assert_eq!(user_action.source_component_id.as_deref(), Some("buy[item1]"));
        assert_eq!(
            user_action.to_query(),
            r#"User performed action: 'order' with data: {"item":"Pizza"}"#
        );
    }
}
