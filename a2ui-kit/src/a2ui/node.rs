//! A2UI Component Nodes
//!
//! Raw component nodes as they arrive in tree messages, and the classifier
//! that maps a node's `type` tag onto a typed [`NodeVariant`].
//!
//! Nodes reference their children by id. The tree is rebuilt by lookup, so a
//! patch can replace a single node without touching its ancestors.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::action::ActionDefinition;
use super::value::{BooleanValue, NumberValue, StringValue};

/// A component node in a surface's adjacency list.
///
/// Two wire shapes are accepted:
///
/// ```text
/// {"id": "title", "type": "Text", "properties": {"text": {"path": "/greeting"}}}
/// {"id": "title", "component": {"Text": {"text": {"path": "/greeting"}}}}
/// ```
///
/// The second (protocol v0.8) shape is normalised into the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    /// Unique component ID within its surface
    pub id: String,

    /// Type discriminant, e.g. `Text` or `Row`
    #[serde(rename = "type")]
    pub component_type: String,

    /// Optional flex weight for Row/Column layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Property bag, decoded lazily by [`classify`]
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        ComponentNode {
            id: id.into(),
            component_type: component_type.into(),
            weight: None,
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Decode a node from either accepted wire shape.
    pub fn from_json(value: Value) -> Result<Self, String> {
        let Value::Object(mut map) = value else {
            return Err("component node must be an object".to_string());
        };

        let id = match map.remove("id") {
            Some(Value::String(id)) => id,
            Some(_) => return Err("component `id` must be a string".to_string()),
            None => return Err("component is missing `id`".to_string()),
        };

        // Lenient weight: numbers are kept, anything else is ignored.
        let weight = map.remove("weight").and_then(|w| w.as_f64());

        if let Some(tag) = map.remove("type") {
            let Value::String(component_type) = tag else {
                return Err(format!("component `{}` has a non-string `type`", id));
            };
            let properties = match map.remove("properties") {
                None | Some(Value::Null) => Map::new(),
                Some(Value::Object(props)) => props,
                Some(_) => {
                    return Err(format!("component `{}` has non-object `properties`", id));
                }
            };
            return Ok(ComponentNode {
                id,
                component_type,
                weight,
                properties,
            });
        }

        match map.remove("component") {
            Some(Value::Object(wrapped)) if wrapped.len() == 1 => {
                let Some((component_type, props)) = wrapped.into_iter().next() else {
                    return Err(format!("component `{}` has an empty `component`", id));
                };
                let properties = match props {
                    Value::Object(props) => props,
                    Value::Null => Map::new(),
                    _ => {
                        return Err(format!(
                            "component `{}` has non-object properties for `{}`",
                            id, component_type
                        ));
                    }
                };
                Ok(ComponentNode {
                    id,
                    component_type,
                    weight,
                    properties,
                })
            }
            Some(_) => Err(format!(
                "component `{}` must wrap exactly one component type",
                id
            )),
            None => Err(format!(
                "component `{}` has neither `type` nor `component`",
                id
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ComponentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ComponentNode::from_json(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Component kinds
// ============================================================================

/// Component type identifier for every tag the classifier understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    // Layout
    Column,
    Row,
    List,
    Card,

    // Display
    Text,
    Badge,
    Image,
    Icon,
    Divider,

    // Interactive
    Button,
    TextField,
    Checkbox,
    Slider,
    Select,

    // Container
    Modal,
    Tabs,

    // Host-defined
    Custom,
}

impl ComponentKind {
    /// Get the canonical tag name
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Column => "Column",
            ComponentKind::Row => "Row",
            ComponentKind::List => "List",
            ComponentKind::Card => "Card",
            ComponentKind::Text => "Text",
            ComponentKind::Badge => "Badge",
            ComponentKind::Image => "Image",
            ComponentKind::Icon => "Icon",
            ComponentKind::Divider => "Divider",
            ComponentKind::Button => "Button",
            ComponentKind::TextField => "TextField",
            ComponentKind::Checkbox => "Checkbox",
            ComponentKind::Slider => "Slider",
            ComponentKind::Select => "Select",
            ComponentKind::Modal => "Modal",
            ComponentKind::Tabs => "Tabs",
            ComponentKind::Custom => "Custom",
        }
    }

    /// Parse a type tag. Older spellings (`CheckBox`, `MultipleChoice`) map
    /// onto their current kinds.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Column" => Some(ComponentKind::Column),
            "Row" => Some(ComponentKind::Row),
            "List" => Some(ComponentKind::List),
            "Card" => Some(ComponentKind::Card),
            "Text" => Some(ComponentKind::Text),
            "Badge" => Some(ComponentKind::Badge),
            "Image" => Some(ComponentKind::Image),
            "Icon" => Some(ComponentKind::Icon),
            "Divider" => Some(ComponentKind::Divider),
            "Button" => Some(ComponentKind::Button),
            "TextField" => Some(ComponentKind::TextField),
            "Checkbox" | "CheckBox" => Some(ComponentKind::Checkbox),
            "Slider" => Some(ComponentKind::Slider),
            "Select" | "MultipleChoice" => Some(ComponentKind::Select),
            "Modal" => Some(ComponentKind::Modal),
            "Tabs" => Some(ComponentKind::Tabs),
            "Custom" => Some(ComponentKind::Custom),
            _ => None,
        }
    }

    /// Get all component kinds
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::Column,
            ComponentKind::Row,
            ComponentKind::List,
            ComponentKind::Card,
            ComponentKind::Text,
            ComponentKind::Badge,
            ComponentKind::Image,
            ComponentKind::Icon,
            ComponentKind::Divider,
            ComponentKind::Button,
            ComponentKind::TextField,
            ComponentKind::Checkbox,
            ComponentKind::Slider,
            ComponentKind::Select,
            ComponentKind::Modal,
            ComponentKind::Tabs,
            ComponentKind::Custom,
        ]
    }
}

// ============================================================================
// Children
// ============================================================================

/// Children reference - either explicit list or template-based
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ChildrenRepr")]
pub enum ChildrenRef {
    /// Explicit list of child component IDs
    ExplicitList(Vec<String>),

    /// Template-based children (for dynamic lists)
    Template {
        /// Template component ID
        #[serde(rename = "componentId")]
        component_id: String,
        /// Data binding path for the list data
        #[serde(rename = "dataBinding")]
        data_binding: String,
    },
}

/// A bare id array is accepted as an explicit list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChildrenRepr {
    Ids(Vec<String>),
    Tagged(TaggedChildren),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum TaggedChildren {
    ExplicitList(Vec<String>),
    Template {
        #[serde(rename = "componentId")]
        component_id: String,
        #[serde(rename = "dataBinding")]
        data_binding: String,
    },
}

impl From<ChildrenRepr> for ChildrenRef {
    fn from(repr: ChildrenRepr) -> Self {
        match repr {
            ChildrenRepr::Ids(ids) | ChildrenRepr::Tagged(TaggedChildren::ExplicitList(ids)) => {
                ChildrenRef::ExplicitList(ids)
            }
            ChildrenRepr::Tagged(TaggedChildren::Template {
                component_id,
                data_binding,
            }) => ChildrenRef::Template {
                component_id,
                data_binding,
            },
        }
    }
}

impl Default for ChildrenRef {
    fn default() -> Self {
        ChildrenRef::ExplicitList(vec![])
    }
}

/// One outgoing edge of a node, as seen by the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSlot<'a> {
    Node(&'a str),
    Template {
        component_id: &'a str,
        data_binding: &'a str,
    },
}

fn push_children<'a>(slots: &mut Vec<ChildSlot<'a>>, children: &'a ChildrenRef) {
    match children {
        ChildrenRef::ExplicitList(ids) => slots.extend(ids.iter().map(|id| ChildSlot::Node(id))),
        ChildrenRef::Template {
            component_id,
            data_binding,
        } => slots.push(ChildSlot::Template {
            component_id,
            data_binding,
        }),
    }
}

// ============================================================================
// Layout Components
// ============================================================================

/// Vertical layout container
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnComponent {
    #[serde(default)]
    pub children: ChildrenRef,

    /// Cross-axis alignment
    #[serde(default)]
    pub alignment: Option<Alignment>,

    /// Main-axis distribution
    #[serde(default)]
    pub distribution: Option<Distribution>,
}

/// Horizontal layout container
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowComponent {
    #[serde(default)]
    pub children: ChildrenRef,

    #[serde(default)]
    pub alignment: Option<Alignment>,

    #[serde(default)]
    pub distribution: Option<Distribution>,
}

/// Scrollable list container
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComponent {
    /// Child component references (usually template-based)
    #[serde(default)]
    pub children: ChildrenRef,

    #[serde(default)]
    pub direction: Option<ListDirection>,
}

/// Card container with a single child
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardComponent {
    pub child: String,

    /// Elevation level (shadow depth)
    #[serde(default)]
    pub elevation: Option<u8>,
}

// ============================================================================
// Display Components
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComponent {
    #[serde(default)]
    pub text: StringValue,

    /// Usage hint for styling (h1, h2, body, caption, etc.)
    #[serde(default)]
    pub usage_hint: Option<TextUsageHint>,
}

/// Small status label
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeComponent {
    #[serde(default)]
    pub text: StringValue,

    #[serde(default)]
    pub variant: Option<BadgeVariant>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    pub url: StringValue,

    #[serde(default)]
    pub fit: Option<ImageFit>,

    #[serde(default)]
    pub usage_hint: Option<ImageUsageHint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconComponent {
    /// Icon name (e.g., "settings", "check", "close")
    pub name: StringValue,

    /// Icon size in logical pixels
    #[serde(default)]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerComponent {
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

// ============================================================================
// Interactive Components
// ============================================================================

/// Clickable button. Content is either a child component or a plain label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonComponent {
    #[serde(default)]
    pub child: Option<String>,

    #[serde(default)]
    pub label: Option<StringValue>,

    /// Whether this is a primary action
    #[serde(default)]
    pub primary: Option<bool>,

    #[serde(default)]
    pub action: Option<ActionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldComponent {
    /// Current value (path-bound for two-way binding)
    #[serde(default)]
    pub text: StringValue,

    #[serde(default)]
    pub label: Option<StringValue>,

    #[serde(default)]
    pub placeholder: Option<StringValue>,

    #[serde(default)]
    pub input_type: Option<TextInputType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxComponent {
    pub value: BooleanValue,

    #[serde(default)]
    pub label: Option<StringValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderComponent {
    pub value: NumberValue,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    #[serde(default)]
    pub step: Option<f64>,
}

/// Selection from a fixed option list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectComponent {
    /// Selected value(s) (path-bound)
    pub value: StringValue,

    #[serde(default)]
    pub options: Vec<ChoiceOption>,

    #[serde(default)]
    pub multi_select: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    pub value: String,
    pub label: StringValue,
}

// ============================================================================
// Container Components
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalComponent {
    /// Visibility state (path-bound)
    #[serde(default)]
    pub visible: BooleanValue,

    #[serde(default)]
    pub children: ChildrenRef,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsComponent {
    pub tabs: Vec<TabDefinition>,

    /// Currently selected tab ID
    #[serde(default)]
    pub selected: Option<StringValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDefinition {
    pub id: String,
    pub label: StringValue,
    /// Content component ID
    pub content: String,
}

/// A host-defined component. `name` selects the host renderer; every other
/// property is passed through, with binding-shaped values resolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomComponent {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub children: ChildrenRef,

    #[serde(flatten)]
    pub properties: IndexMap<String, Value>,
}

// ============================================================================
// Enums
// ============================================================================

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
    Fill,
    None,
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
pub enum TextInputType {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Tel,
    Url,
    #[serde(other)]
    Unknown,
}

// ============================================================================
// Classification
// ============================================================================

/// Why a node could not be classified.
#[derive(Debug, Clone, PartialEq)]
pub enum UnclassifiedReason {
    /// The `type` tag is not one the classifier knows
    UnknownType,
    /// The tag is known but its properties did not decode
    InvalidProperties(String),
}

/// A node kept verbatim for fallback rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Unclassified {
    pub node: ComponentNode,
    pub reason: UnclassifiedReason,
}

/// A node after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeVariant {
    Column(ColumnComponent),
    Row(RowComponent),
    List(ListComponent),
    Card(CardComponent),
    Text(TextComponent),
    Badge(BadgeComponent),
    Image(ImageComponent),
    Icon(IconComponent),
    Divider(DividerComponent),
    Button(ButtonComponent),
    TextField(TextFieldComponent),
    Checkbox(CheckboxComponent),
    Slider(SliderComponent),
    Select(SelectComponent),
    Modal(ModalComponent),
    Tabs(TabsComponent),
    Custom(CustomComponent),
    Unclassified(Unclassified),
}

impl NodeVariant {
    /// The kind of a classified node; `None` for the fallback.
    pub fn kind(&self) -> Option<ComponentKind> {
        let kind = match self {
            NodeVariant::Column(_) => ComponentKind::Column,
            NodeVariant::Row(_) => ComponentKind::Row,
            NodeVariant::List(_) => ComponentKind::List,
            NodeVariant::Card(_) => ComponentKind::Card,
            NodeVariant::Text(_) => ComponentKind::Text,
            NodeVariant::Badge(_) => ComponentKind::Badge,
            NodeVariant::Image(_) => ComponentKind::Image,
            NodeVariant::Icon(_) => ComponentKind::Icon,
            NodeVariant::Divider(_) => ComponentKind::Divider,
            NodeVariant::Button(_) => ComponentKind::Button,
            NodeVariant::TextField(_) => ComponentKind::TextField,
            NodeVariant::Checkbox(_) => ComponentKind::Checkbox,
            NodeVariant::Slider(_) => ComponentKind::Slider,
            NodeVariant::Select(_) => ComponentKind::Select,
            NodeVariant::Modal(_) => ComponentKind::Modal,
            NodeVariant::Tabs(_) => ComponentKind::Tabs,
            NodeVariant::Custom(_) => ComponentKind::Custom,
            NodeVariant::Unclassified(_) => return None,
        };
        Some(kind)
    }

    /// The action declared by the node, if any.
    pub fn action(&self) -> Option<&ActionDefinition> {
        match self {
            NodeVariant::Button(button) => button.action.as_ref(),
            _ => None,
        }
    }

    /// Outgoing child references in declaration order.
    pub fn child_slots(&self) -> Vec<ChildSlot<'_>> {
        let mut slots = Vec::new();
        match self {
            NodeVariant::Column(c) => push_children(&mut slots, &c.children),
            NodeVariant::Row(r) => push_children(&mut slots, &r.children),
            NodeVariant::List(l) => push_children(&mut slots, &l.children),
            NodeVariant::Modal(m) => push_children(&mut slots, &m.children),
            NodeVariant::Custom(c) => push_children(&mut slots, &c.children),
            NodeVariant::Card(card) => slots.push(ChildSlot::Node(&card.child)),
            NodeVariant::Button(button) => {
                if let Some(child) = &button.child {
                    slots.push(ChildSlot::Node(child));
                }
            }
            NodeVariant::Tabs(tabs) => {
                slots.extend(tabs.tabs.iter().map(|tab| ChildSlot::Node(&tab.content)));
            }
            NodeVariant::Text(_)
            | NodeVariant::Badge(_)
            | NodeVariant::Image(_)
            | NodeVariant::Icon(_)
            | NodeVariant::Divider(_)
            | NodeVariant::TextField(_)
            | NodeVariant::Checkbox(_)
            | NodeVariant::Slider(_)
            | NodeVariant::Select(_)
            | NodeVariant::Unclassified(_) => {}
        }
        slots
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    node: &ComponentNode,
    wrap: fn(T) -> NodeVariant,
) -> NodeVariant {
    match serde_json::from_value::<T>(Value::Object(node.properties.clone())) {
        Ok(component) => wrap(component),
        Err(err) => NodeVariant::Unclassified(Unclassified {
            node: node.clone(),
            reason: UnclassifiedReason::InvalidProperties(err.to_string()),
        }),
    }
}

/// Classify a raw node by its `type` tag.
///
/// Never fails: unknown tags and undecodable properties both come back as
/// [`NodeVariant::Unclassified`] carrying the node unchanged.
pub fn classify(node: &ComponentNode) -> NodeVariant {
    let Some(kind) = ComponentKind::from_tag(&node.component_type) else {
        return NodeVariant::Unclassified(Unclassified {
            node: node.clone(),
            reason: UnclassifiedReason::UnknownType,
        });
    };

    match kind {
        ComponentKind::Column => decode(node, NodeVariant::Column),
        ComponentKind::Row => decode(node, NodeVariant::Row),
        ComponentKind::List => decode(node, NodeVariant::List),
        ComponentKind::Card => decode(node, NodeVariant::Card),
        ComponentKind::Text => decode(node, NodeVariant::Text),
        ComponentKind::Badge => decode(node, NodeVariant::Badge),
        ComponentKind::Image => decode(node, NodeVariant::Image),
        ComponentKind::Icon => decode(node, NodeVariant::Icon),
        ComponentKind::Divider => decode(node, NodeVariant::Divider),
        ComponentKind::Button => decode(node, NodeVariant::Button),
        ComponentKind::TextField => decode(node, NodeVariant::TextField),
        ComponentKind::Checkbox => decode(node, NodeVariant::Checkbox),
        ComponentKind::Slider => decode(node, NodeVariant::Slider),
        ComponentKind::Select => decode(node, NodeVariant::Select),
        ComponentKind::Modal => decode(node, NodeVariant::Modal),
        ComponentKind::Tabs => decode(node, NodeVariant::Tabs),
        ComponentKind::Custom => decode(node, NodeVariant::Custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(json: Value) -> ComponentNode {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parse_flat_shape() {
        let n = node(json!({"id": "root", "type": "Text", "properties": {"text": {"path": "/greeting"}}}));
        assert_eq!(n.id, "root");
        assert_eq!(n.component_type, "Text");
        assert!(n.properties.contains_key("text"));
    }

    #[test]
    fn test_parse_wrapped_shape() {
        let n = node(json!({
            "id": "title",
            "weight": 2,
            "component": {"Text": {"text": {"literalString": "Hello"}, "usageHint": "h1"}}
        }));
        assert_eq!(n.component_type, "Text");
        assert_eq!(n.weight, Some(2.0));

        match classify(&n) {
            NodeVariant::Text(text) => {
                assert_eq!(text.text, StringValue::literal("Hello"));
                assert_eq!(text.usage_hint, Some(TextUsageHint::H1));
            }
            other => panic!("Expected Text, got {:?}", other),
        }
    }

    #[test]
    fn test_lenient_weight() {
        let n = node(json!({"id": "a", "type": "Divider", "weight": "heavy"}));
        assert_eq!(n.weight, None);
    }

    #[test]
    fn test_reject_bad_shapes() {
        assert!(ComponentNode::from_json(json!("Text")).is_err());
        assert!(ComponentNode::from_json(json!({"type": "Text"})).is_err());
        assert!(ComponentNode::from_json(json!({"id": 3, "type": "Text"})).is_err());
        assert!(ComponentNode::from_json(json!({"id": "a"})).is_err());
        assert!(ComponentNode::from_json(json!({"id": "a", "type": "Text", "properties": []})).is_err());
        assert!(ComponentNode::from_json(json!({"id": "a", "component": {"Text": {}, "Row": {}}})).is_err());
    }

    #[test]
    fn test_unknown_tag_is_unclassified() {
        let n = ComponentNode::new("x", "Hologram").with_property("depth", json!(3));
        match classify(&n) {
            NodeVariant::Unclassified(u) => {
                assert_eq!(u.reason, UnclassifiedReason::UnknownType);
                assert_eq!(u.node, n);
            }
            other => panic!("Expected Unclassified, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_properties_are_unclassified() {
        let n = ComponentNode::new("c", "Card");
        match classify(&n) {
            NodeVariant::Unclassified(u) => {
                assert!(matches!(u.reason, UnclassifiedReason::InvalidProperties(_)));
            }
            other => panic!("Expected Unclassified, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_tags() {
        let n = ComponentNode::new("c", "CheckBox").with_property("value", json!({"path": "/ok"}));
        assert_eq!(classify(&n).kind(), Some(ComponentKind::Checkbox));

        let n = ComponentNode::new("m", "MultipleChoice")
            .with_property("value", json!({"path": "/pick"}))
            .with_property("options", json!([{"value": "a", "label": {"literalString": "A"}}]));
        assert_eq!(classify(&n).kind(), Some(ComponentKind::Select));
    }

    #[test]
    fn test_every_kind_round_trips_its_tag() {
        for kind in ComponentKind::all() {
            assert_eq!(ComponentKind::from_tag(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_children_shapes() {
        let explicit = ComponentNode::new("col", "Column")
            .with_property("children", json!({"explicitList": ["a", "b"]}));
        assert_eq!(
            classify(&explicit).child_slots(),
            vec![ChildSlot::Node("a"), ChildSlot::Node("b")]
        );

        let bare = ComponentNode::new("row", "Row").with_property("children", json!(["a"]));
        assert_eq!(classify(&bare).child_slots(), vec![ChildSlot::Node("a")]);

        let template = ComponentNode::new("list", "List").with_property(
            "children",
            json!({"template": {"componentId": "item", "dataBinding": "/items"}}),
        );
        assert_eq!(
            classify(&template).child_slots(),
            vec![ChildSlot::Template {
                component_id: "item",
                data_binding: "/items"
            }]
        );
    }

    #[test]
    fn test_button_and_tabs_slots() {
        let button = ComponentNode::new("b", "Button")
            .with_property("child", json!("label"))
            .with_property("action", json!({"name": "submit"}));
        let variant = classify(&button);
        assert_eq!(variant.child_slots(), vec![ChildSlot::Node("label")]);
        assert_eq!(variant.action().map(|a| a.name.as_str()), Some("submit"));

        let tabs = ComponentNode::new("t", "Tabs").with_property(
            "tabs",
            json!([
                {"id": "one", "label": "One", "content": "pane1"},
                {"id": "two", "label": "Two", "content": "pane2"}
            ]),
        );
        assert_eq!(
            classify(&tabs).child_slots(),
            vec![ChildSlot::Node("pane1"), ChildSlot::Node("pane2")]
        );
    }

    #[test]
    fn test_custom_keeps_extra_properties() {
        let n = ComponentNode::new("chart", "Custom")
            .with_property("name", json!("BarChart"))
            .with_property("series", json!({"path": "/sales"}))
            .with_property("color", json!("teal"));
        match classify(&n) {
            NodeVariant::Custom(custom) => {
                assert_eq!(custom.name.as_deref(), Some("BarChart"));
                assert_eq!(custom.properties.get("color"), Some(&json!("teal")));
                assert!(custom.properties.contains_key("series"));
            }
            other => panic!("Expected Custom, got {:?}", other),
        }
    }
}
