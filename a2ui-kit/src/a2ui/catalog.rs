//! A2UI Component Catalog
//!
//! The closed set of component tags a surface may contain, with the short
//! descriptions used when describing the catalog to a model.

use serde::{Serialize, Serializer};
use std::fmt;

use super::message::ComponentType;

/// Component tag identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentTag {
    // Layout
    Column,
    Row,
    List,
    Card,
    Tabs,
    Modal,
    Divider,

    // Display
    Heading,
    Text,
    Image,
    Icon,
    Video,
    AudioPlayer,

    // Interactive
    Button,
    CheckBox,
    TextField,
    DateTimeInput,
    MultipleChoice,
    Slider,
}

impl ComponentTag {
    /// Get the wire name of this tag
    pub fn name(&self) -> &'static str {
        match self {
            ComponentTag::Column => "Column",
            ComponentTag::Row => "Row",
            ComponentTag::List => "List",
            ComponentTag::Card => "Card",
            ComponentTag::Tabs => "Tabs",
            ComponentTag::Modal => "Modal",
            ComponentTag::Divider => "Divider",
            ComponentTag::Heading => "Heading",
            ComponentTag::Text => "Text",
            ComponentTag::Image => "Image",
            ComponentTag::Icon => "Icon",
            ComponentTag::Video => "Video",
            ComponentTag::AudioPlayer => "AudioPlayer",
            ComponentTag::Button => "Button",
            ComponentTag::CheckBox => "CheckBox",
            ComponentTag::TextField => "TextField",
            ComponentTag::DateTimeInput => "DateTimeInput",
            ComponentTag::MultipleChoice => "MultipleChoice",
            ComponentTag::Slider => "Slider",
        }
    }

    /// Parse from a wire name
    pub fn from_name(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|tag| tag.name() == s)
    }

    /// Get all component tags
    pub fn all() -> &'static [ComponentTag] {
        &[
            ComponentTag::Column,
            ComponentTag::Row,
            ComponentTag::List,
            ComponentTag::Card,
            ComponentTag::Tabs,
            ComponentTag::Modal,
            ComponentTag::Divider,
            ComponentTag::Heading,
            ComponentTag::Text,
            ComponentTag::Image,
            ComponentTag::Icon,
            ComponentTag::Video,
            ComponentTag::AudioPlayer,
            ComponentTag::Button,
            ComponentTag::CheckBox,
            ComponentTag::TextField,
            ComponentTag::DateTimeInput,
            ComponentTag::MultipleChoice,
            ComponentTag::Slider,
        ]
    }

    /// Whether direct children of this tag honor `weight`.
    pub fn honors_child_weight(&self) -> bool {
        matches!(self, ComponentTag::Row | ComponentTag::Column)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ComponentTag::Column => "Vertical layout of children",
            ComponentTag::Row => "Horizontal layout of children",
            ComponentTag::List => "Scrollable list, usually expanded from a template",
            ComponentTag::Card => "Elevated container around a single child",
            ComponentTag::Tabs => "Tabbed container, one child per tab",
            ComponentTag::Modal => "Dialog opened from an entry point child",
            ComponentTag::Divider => "Horizontal or vertical separator line",
            ComponentTag::Heading => "Heading text, level 1 to 5",
            ComponentTag::Text => "Body text with an optional usage hint",
            ComponentTag::Image => "Image loaded from a URL",
            ComponentTag::Icon => "Named icon",
            ComponentTag::Video => "Video player for a URL",
            ComponentTag::AudioPlayer => "Audio player for a URL with a description",
            ComponentTag::Button => "Clickable button that sends an action",
            ComponentTag::CheckBox => "Checkbox bound to a boolean",
            ComponentTag::TextField => "Text input bound to a string",
            ComponentTag::DateTimeInput => "Date and/or time picker",
            ComponentTag::MultipleChoice => "Selection from a list of options",
            ComponentTag::Slider => "Numeric slider between min and max",
        }
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ComponentTag {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl ComponentType {
    /// The catalog tag of this component
    pub fn tag(&self) -> ComponentTag {
        match self {
            ComponentType::Column(_) => ComponentTag::Column,
            ComponentType::Row(_) => ComponentTag::Row,
            ComponentType::List(_) => ComponentTag::List,
            ComponentType::Card(_) => ComponentTag::Card,
            ComponentType::Tabs(_) => ComponentTag::Tabs,
            ComponentType::Modal(_) => ComponentTag::Modal,
            ComponentType::Divider(_) => ComponentTag::Divider,
            ComponentType::Heading(_) => ComponentTag::Heading,
            ComponentType::Text(_) => ComponentTag::Text,
            ComponentType::Image(_) => ComponentTag::Image,
            ComponentType::Icon(_) => ComponentTag::Icon,
            ComponentType::Video(_) => ComponentTag::Video,
            ComponentType::AudioPlayer(_) => ComponentTag::AudioPlayer,
            ComponentType::Button(_) => ComponentTag::Button,
            ComponentType::CheckBox(_) => ComponentTag::CheckBox,
            ComponentType::TextField(_) => ComponentTag::TextField,
            ComponentType::DateTimeInput(_) => ComponentTag::DateTimeInput,
            ComponentType::MultipleChoice(_) => ComponentTag::MultipleChoice,
            ComponentType::Slider(_) => ComponentTag::Slider,
        }
    }
}
