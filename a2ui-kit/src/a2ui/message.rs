//! A2UI Protocol Message Types
//!
//! Wire shapes of the v0.8 server-to-client messages, the component
//! catalog's property records, and the client-to-agent `userAction` event.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::value::ValueRef;

/// The four action keys a server-to-client message may carry.
pub const ACTION_KEYS: [&str; 4] = [
    "beginRendering",
    "surfaceUpdate",
    "dataModelUpdate",
    "deleteSurface",
];

/// Lenient f64 deserializer: accepts numbers, ignores other types.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let val = Option::<Value>::deserialize(d)?.and_then(|v| v.as_f64());
    Ok(val)
}

/// One server-to-client message, keyed on the wire by its action name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum A2uiMessage {
    BeginRendering(BeginRendering),
    SurfaceUpdate(SurfaceUpdate),
    DataModelUpdate(DataModelUpdate),
    DeleteSurface(DeleteSurface),
}

impl A2uiMessage {
    pub fn surface_id(&self) -> &str {
        match self {
            A2uiMessage::BeginRendering(m) => &m.surface_id,
            A2uiMessage::SurfaceUpdate(m) => &m.surface_id,
            A2uiMessage::DataModelUpdate(m) => &m.surface_id,
            A2uiMessage::DeleteSurface(m) => &m.surface_id,
        }
    }

    /// The wire name of this message's action key.
    pub fn action_key(&self) -> &'static str {
        match self {
            A2uiMessage::BeginRendering(_) => "beginRendering",
            A2uiMessage::SurfaceUpdate(_) => "surfaceUpdate",
            A2uiMessage::DataModelUpdate(_) => "dataModelUpdate",
            A2uiMessage::DeleteSurface(_) => "deleteSurface",
        }
    }
}

/// Marks a surface as ready to draw and names its root.
///
/// ```text
/// {"beginRendering": {"surfaceId": "s", "root": "card", "styles": {"font": "Inter"}}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    pub surface_id: String,

    pub root: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<SurfaceStyles>,
}

/// Surface-wide styling hints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Keys this crate does not interpret
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Merges component definitions into a surface by id.
///
/// ```text
/// {"surfaceUpdate": {"surfaceId": "s", "components": [
///   {"id": "card", "component": {"Card": {"child": "title"}}}
/// ]}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    pub surface_id: String,

    pub components: Vec<ComponentDefinition>,
}

/// An entry of the flat component map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub id: String,

    /// Flex weight, honored under Row and Column only
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,

    pub component: ComponentType,
}

/// Tag plus property record, externally tagged on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentType {
    // Layout components
    Column(ColumnComponent),
    Row(RowComponent),
    List(ListComponent),
    Card(CardComponent),
    Tabs(TabsComponent),
    Modal(ModalComponent),
    Divider(DividerComponent),

    // Display components
    Heading(HeadingComponent),
    Text(TextComponent),
    Image(ImageComponent),
    Icon(IconComponent),
    Video(VideoComponent),
    AudioPlayer(AudioPlayerComponent),

    // Interactive components
    Button(ButtonComponent),
    CheckBox(CheckBoxComponent),
    TextField(TextFieldComponent),
    DateTimeInput(DateTimeInputComponent),
    MultipleChoice(MultipleChoiceComponent),
    Slider(SliderComponent),
}

/// Structural children of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChildrenRef {
    ExplicitList(Vec<String>),

    /// One instance of `component_id` per entry under `data_binding`
    Template {
        #[serde(rename = "componentId")]
        component_id: String,
        #[serde(rename = "dataBinding")]
        data_binding: String,
    },
}

impl Default for ChildrenRef {
    fn default() -> Self {
        ChildrenRef::ExplicitList(vec![])
    }
}

// Containers

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnComponent {
    pub children: ChildrenRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowComponent {
    pub children: ChildrenRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Distribution>,
}

/// Scrolling container, usually fed by a template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComponent {
    pub children: ChildrenRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<ListDirection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

/// Card container around a single child
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardComponent {
    pub child: String,
}

/// One child per tab, titled
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsComponent {
    pub tab_items: Vec<TabItem>,
}

/// A single tab: title plus content component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabItem {
    pub title: ValueRef,
    pub child: String,
}

/// Modal dialog, opened from an entry point component
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalComponent {
    /// Component that opens the modal (e.g. a button)
    pub entry_point_child: String,

    /// Component displayed inside the modal
    pub content_child: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Orientation>,
}

// Content

/// Heading text, level "1" through "5"
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingComponent {
    pub text: ValueRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComponent {
    pub text: ValueRef,

    /// h1..h5, body, caption or code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_hint: Option<TextUsageHint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    pub url: ValueRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_hint: Option<ImageUsageHint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconComponent {
    /// Material-style icon name such as `check`
    pub name: ValueRef,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoComponent {
    pub url: ValueRef,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerComponent {
    pub url: ValueRef,

    /// Title or summary of the audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueRef>,
}

// Inputs

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonComponent {
    /// Label content, usually a Text
    pub child: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,

    /// Sent back to the agent when pressed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBoxComponent {
    pub label: ValueRef,

    /// Usually bound to a boolean path
    pub value: ValueRef,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldComponent {
    pub label: ValueRef,

    /// Bound path receives user edits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<ValueRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_field_type: Option<TextFieldType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_regexp: Option<String>,
}

/// Date and/or time picker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeInputComponent {
    pub value: ValueRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_date: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_time: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceComponent {
    /// Selected values (literal array or path-bound)
    pub selections: ValueRef,

    pub options: Vec<ChoiceOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_allowed_selections: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    pub label: ValueRef,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderComponent {
    pub value: ValueRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

// Property enums

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    Stretch,
    #[serde(other)]
    Unknown,
}

/// Main-axis spacing for Row and Column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Distribution {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListDirection {
    #[default]
    Vertical,
    Horizontal,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextUsageHint {
    H1,
    H2,
    H3,
    H4,
    H5,
    #[default]
    Body,
    Caption,
    Code,
    #[serde(other)]
    Unknown,
}

/// Image fit modes (CSS `object-fit`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
    Fill,
    None,
    #[serde(alias = "scale-down")]
    ScaleDown,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageUsageHint {
    Icon,
    Avatar,
    SmallFeature,
    #[default]
    MediumFeature,
    LargeFeature,
    Header,
    #[serde(other)]
    Unknown,
}

/// Orientation for dividers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextFieldType {
    Date,
    LongText,
    Number,
    #[default]
    ShortText,
    Obscured,
    #[serde(other)]
    Unknown,
}

// Actions and data model contents

/// A named action with context entries resolved at projection time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDefinition {
    /// Action name (e.g., "book_restaurant", "submit_form")
    pub name: String,

    #[serde(default)]
    pub context: Vec<ActionContextItem>,
}

/// One `key` / `value` pair of an action context.
///
/// Models sometimes drop the `key` or nest the reference wrongly, so both
/// fields default and empty keys are skipped during projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContextItem {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub value: ValueRef,
}

/// Writes into a surface's data model.
///
/// ```text
/// {"dataModelUpdate": {"surfaceId": "s", "path": "/cart", "contents": [{"key": "total", "valueNumber": 12.5}]}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdate {
    pub surface_id: String,

    /// Target path; `/` (the default) replaces the whole model
    #[serde(default = "default_path")]
    pub path: String,

    pub contents: Vec<DataContent>,
}

fn default_path() -> String {
    "/".to_string()
}

/// One keyed entry of `contents` or of a `valueMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataContent {
    pub key: String,

    #[serde(flatten)]
    pub value: DataValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataValue {
    ValueString(String),
    ValueNumber(f64),
    ValueBoolean(bool),
    /// Nested map, as an adjacency list of entries
    ValueMap(Vec<DataContent>),
    ValueArray(Vec<DataValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSurface {
    pub surface_id: String,
}

// Client events

/// Client-to-agent event fired by an interactive component.
///
/// ```text
/// {"userAction": {"name": "add_to_cart", "surfaceId": "s", "sourceComponentId": "buy", "context": {"sku": "A-1"}}}
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
    #[serde(alias = "actionName")]
    pub name: String,

    #[serde(default)]
    pub surface_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_component_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Already resolved, in declaration order
    #[serde(default)]
    pub context: IndexMap<String, Value>,
}

impl UserAction {
    /// Extract a user action from a client event object
    /// (`{"userAction": {...}}`).
    pub fn from_client_event(event: &Value) -> Option<Self> {
        let payload = event.get("userAction")?;
        serde_json::from_value(payload.clone()).ok()
    }

    /// Render the action as query text for the next model turn.
    pub fn to_query(&self) -> String {
        let data = serde_json::to_string(&self.context).unwrap_or_else(|_| "{}".to_string());
        format!("User performed action: '{}' with data: {}", self.name, data)
    }
}
