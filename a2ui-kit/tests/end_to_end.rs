use a2ui_kit::a2ui::*;
use serde_json::{Value, json};

fn apply(registry: &mut SurfaceRegistry, messages: Value) -> BatchReport {
    let Value::Array(messages) = messages else {
        panic!("expected an array of messages");
    };
    registry.apply_batch(&messages)
}

#[test]
fn restaurants_reply_projects_single_text_node() {
    let blob = r#"Here are restaurants.---a2ui_JSON---
[{"beginRendering":{"surfaceId":"s","root":"r"}},{"surfaceUpdate":{"surfaceId":"s","components":[{"id":"r","component":{"Text":{"text":{"literalString":"hi"}}}}]}}]"#;

    let ingested = ingest(blob).unwrap();
    assert_eq!(ingested.text, "Here are restaurants.");
    assert_eq!(ingested.messages.len(), 2);

    let mut registry = SurfaceRegistry::new();
    let report = registry.apply_batch(&ingested.messages);
    assert!(report.diagnostics.is_empty());

    let projection = registry.project("s").unwrap();
    let root = &projection.tree.root;
    assert_eq!(root.tag(), Some(ComponentTag::Text));
    assert_eq!(root.text("text"), Some("hi"));
    assert!(root.children.is_empty());
}

#[test]
fn numeric_binding_resolves_natively() {
    let mut registry = SurfaceRegistry::new();
    apply(
        &mut registry,
        json!([{"dataModelUpdate": {"surfaceId": "s", "path": "/", "contents": [{"key": "n", "valueNumber": 4.8}]}}]),
    );

    let model = &registry.get_surface("s").unwrap().data_model;
    assert_eq!(resolve(&ValueRef::path("n"), model, None), Resolved::Number(4.8));
}

#[test]
fn root_data_update_replaces_model() {
    let mut registry = SurfaceRegistry::new();
    apply(
        &mut registry,
        json!([
            {"dataModelUpdate": {"surfaceId": "s", "path": "/", "contents": [{"key": "y", "valueString": "old"}]}},
            {"dataModelUpdate": {"surfaceId": "s", "path": "/", "contents": [{"key": "x", "valueString": "a"}]}}
        ]),
    );

    let model = &registry.get_surface("s").unwrap().data_model;
    assert_eq!(model.get_string("/x"), Some("a"));
    assert!(model.get("/y").is_none());
}

#[test]
fn subtree_data_update_keeps_siblings() {
    let mut registry = SurfaceRegistry::new();
    apply(
        &mut registry,
        json!([
            {"dataModelUpdate": {"surfaceId": "s", "path": "/", "contents": [
                {"key": "items", "valueMap": [{"key": "item1", "valueMap": [
                    {"key": "name", "valueString": "Alice"},
                    {"key": "rating", "valueNumber": 4.5}
                ]}]}
            ]}},
            {"dataModelUpdate": {"surfaceId": "s", "path": "/items/item1", "contents": [{"key": "name", "valueString": "Bob"}]}}
        ]),
    );

    let model = &registry.get_surface("s").unwrap().data_model;
    assert_eq!(model.get_string("/items/item1/name"), Some("Bob"));
    assert_eq!(model.get_number("/items/item1/rating"), Some(4.5));
}

#[test]
fn template_children_follow_insertion_order() {
    let mut registry = SurfaceRegistry::new();
    apply(
        &mut registry,
        json!([
            {"beginRendering": {"surfaceId": "s", "root": "list"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "list", "component": {"List": {"children": {"template": {"componentId": "row", "dataBinding": "/items"}}}}},
                {"id": "row", "component": {"Text": {"text": {"path": "name"}}}}
            ]}},
            {"dataModelUpdate": {"surfaceId": "s", "contents": [
                {"key": "items", "valueMap": [
                    {"key": "item2", "valueMap": [{"key": "name", "valueString": "second key, first row"}]},
                    {"key": "item1", "valueMap": [{"key": "name", "valueString": "first key, second row"}]}
                ]}
            ]}}
        ]),
    );

    let projection = registry.project("s").unwrap();
    let rows: Vec<(&str, Option<&str>)> = projection
        .tree
        .root
        .children
        .iter()
        .map(|node| (node.id.as_str(), node.text("text")))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("row[item2]", Some("second key, first row")),
            ("row[item1]", Some("first key, second row")),
        ]
    );
}

#[test]
fn cycles_and_dangling_references_degrade() {
    let mut registry = SurfaceRegistry::new();
    apply(
        &mut registry,
        json!([
            {"beginRendering": {"surfaceId": "s", "root": "a"}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "a", "component": {"Column": {"children": {"explicitList": ["b", "nowhere"]}}}},
                {"id": "b", "component": {"Row": {"children": {"explicitList": ["a"]}}}}
            ]}}
        ]),
    );

    let projection = registry.project("s").unwrap();
    let root = &projection.tree.root;
    assert_eq!(
        root.children[0].children[0].kind,
        NodeKind::Placeholder(PlaceholderReason::Cycle)
    );
    assert_eq!(
        root.children[1].kind,
        NodeKind::Placeholder(PlaceholderReason::BrokenReference)
    );
    assert_eq!(projection.diagnostics.len(), 2);
}

#[test]
fn bare_surface_update_is_repaired_and_applied() {
    let blob = r#"Done.---a2ui_JSON---[
        {"beginRendering": {"surfaceId": "s", "root": "r"}},
        {"surfaceId": "s", "components": [{"id": "r", "component": {"Text": {"text": {"literalString": "fixed"}}}}]}
    ]"#;

    let ingested = ingest(blob).unwrap();
    assert_eq!(ingested.repairs, 1);

    let mut registry = SurfaceRegistry::new();
    let report = registry.apply_batch(&ingested.messages);
    assert!(report.diagnostics.is_empty());
    assert_eq!(
        registry.project("s").unwrap().tree.root.text("text"),
        Some("fixed")
    );
}

#[test]
fn begin_rendering_twice_matches_once() {
    let message = json!({"beginRendering": {"surfaceId": "s", "root": "r"}});

    let mut once = SurfaceRegistry::new();
    apply(&mut once, json!([message.clone()]));

    let mut twice = SurfaceRegistry::new();
    apply(&mut twice, json!([message.clone(), message]));

    assert_eq!(once.get_surface("s"), twice.get_surface("s"));
}

#[test]
fn render_tree_serializes_for_renderers() {
    let mut registry = SurfaceRegistry::new();
    apply(
        &mut registry,
        json!([
            {"beginRendering": {"surfaceId": "s", "root": "row", "styles": {"primaryColor": "#007BFF"}}},
            {"surfaceUpdate": {"surfaceId": "s", "components": [
                {"id": "row", "component": {"Row": {"children": {"explicitList": ["img"]}}}},
                {"id": "img", "weight": 1, "component": {"Image": {"url": {"literalString": "https://example.com/a.png"}, "fit": "cover"}}}
            ]}}
        ]),
    );

    let tree = registry.project("s").unwrap().tree;
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "surfaceId": "s",
            "styles": {"primaryColor": "#007BFF"},
            "root": {
                "id": "row",
                "componentId": "row",
                "kind": {"component": "Row"},
                "children": [{
                    "id": "img",
                    "componentId": "img",
                    "kind": {"component": "Image"},
                    "properties": {"url": "https://example.com/a.png", "fit": "cover"},
                    "weight": 1.0
                }]
            }
        })
    );
}
