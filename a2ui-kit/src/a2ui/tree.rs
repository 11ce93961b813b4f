//! A2UI Component Tree Builder
//!
//! Walks a surface's node map from its root and produces an immutable,
//! fully-resolved snapshot for rendering. Structural problems never abort the
//! walk; they are replaced by marker nodes and listed as diagnostics.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use super::action::ActionDefinition;
use super::config::ProcessorConfig;
use super::data_model::{join_path, resolve_path, DataModel};
use super::node::{classify, ChildSlot, ComponentKind, NodeVariant, UnclassifiedReason};
use super::surface::Surface;
use super::value::{BooleanValue, NumberValue, PrimitiveValue, Scalar, StringValue};

/// Hard ceiling on recursion, whatever the configured depth.
pub const MAX_DEPTH_CEILING: usize = 512;

/// A resolved snapshot of one surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTree {
    pub surface_id: String,
    pub root: ResolvedNode,
    pub diagnostics: Vec<TreeDiagnostic>,
}

impl ComponentTree {
    pub fn is_empty(&self) -> bool {
        matches!(self.root, ResolvedNode::Empty)
    }

    /// First component with the given id, in depth-first order.
    pub fn find(&self, id: &str) -> Option<&ResolvedComponent> {
        self.root.find(id)
    }
}

/// One node of a resolved tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum ResolvedNode {
    Component(ResolvedComponent),

    /// A node the classifier could not place, kept for fallback rendering
    #[serde(rename_all = "camelCase")]
    Unclassified {
        id: String,
        component_type: String,
        properties: Map<String, Value>,
        reason: String,
    },

    /// A referenced id that is not in the node map
    Missing { id: String },

    /// A node reached again through its own descendants
    Cycle { id: String },

    /// Nesting deeper than the configured limit
    DepthExceeded { id: String },

    /// First node past the per-build node limit; later siblings are dropped
    BudgetExhausted { id: String },

    /// The surface does not exist or has no root yet
    Empty,
}

impl ResolvedNode {
    /// Id of the node, if it has one.
    pub fn id(&self) -> Option<&str> {
        match self {
            ResolvedNode::Component(c) => Some(&c.id),
            ResolvedNode::Unclassified { id, .. }
            | ResolvedNode::Missing { id }
            | ResolvedNode::Cycle { id }
            | ResolvedNode::DepthExceeded { id }
            | ResolvedNode::BudgetExhausted { id } => Some(id),
            ResolvedNode::Empty => None,
        }
    }

    pub fn as_component(&self) -> Option<&ResolvedComponent> {
        match self {
            ResolvedNode::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn children(&self) -> &[ResolvedNode] {
        match self {
            ResolvedNode::Component(c) => &c.children,
            _ => &[],
        }
    }

    fn find(&self, id: &str) -> Option<&ResolvedComponent> {
        if let ResolvedNode::Component(c) = self {
            if c.id == id {
                return Some(c);
            }
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}

/// A classified node with its bindings resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedComponent {
    pub id: String,
    pub kind: ComponentKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Template scope this instance was built under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    pub properties: IndexMap<String, PropertyValue>,

    /// Absolute data model paths of path-bound properties, for write-back
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub bindings: IndexMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDefinition>,

    pub children: Vec<ResolvedNode>,
}

impl ResolvedComponent {
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.scalar(key).and_then(Scalar::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.scalar(key).and_then(Scalar::as_f64)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.scalar(key).and_then(Scalar::as_bool)
    }

    fn scalar(&self, key: &str) -> Option<&Scalar> {
        match self.properties.get(key)? {
            PropertyValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Path a renderer writes to when the user edits `key`.
    pub fn binding_path(&self, key: &str) -> Option<&str> {
        self.bindings.get(key).map(String::as_str)
    }
}

/// A resolved property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A binding resolved to a concrete value, or a plain scalar
    Scalar(Scalar),
    /// A binding that resolved to nothing
    Absent,
    /// Enums, option lists and other values not subject to binding
    Structural(Value),
}

/// Structural problems found while building, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreeDiagnostic {
    DanglingReference {
        parent: Option<String>,
        id: String,
    },
    CyclicReference {
        id: String,
        path: Vec<String>,
    },
    DepthExceeded {
        id: String,
        depth: usize,
    },
    BudgetExhausted {
        id: String,
        limit: usize,
    },
    #[serde(rename_all = "camelCase")]
    UnclassifiedNode {
        id: String,
        component_type: String,
        reason: String,
    },
    TemplateTruncated {
        parent: String,
        total: usize,
        kept: usize,
    },
}

/// The tree of a surface that does not exist.
pub fn empty_tree(surface_id: &str) -> ComponentTree {
    ComponentTree {
        surface_id: surface_id.to_string(),
        root: ResolvedNode::Empty,
        diagnostics: Vec::new(),
    }
}

/// Build the resolved tree of a surface.
pub fn build_tree(surface: &Surface, config: &ProcessorConfig) -> ComponentTree {
    let Some(root) = surface.root() else {
        return empty_tree(&surface.id);
    };

    let mut builder = TreeBuilder {
        surface,
        max_depth: config.max_depth.min(MAX_DEPTH_CEILING),
        max_template_items: config.max_template_items,
        max_nodes: config.max_nodes,
        built: 0,
        exhausted: false,
        stack: Vec::new(),
        diagnostics: Vec::new(),
    };
    let root = builder.build(root, None, None, 0);

    ComponentTree {
        surface_id: surface.id.clone(),
        root,
        diagnostics: builder.diagnostics,
    }
}

struct TreeBuilder<'a> {
    surface: &'a Surface,
    max_depth: usize,
    max_template_items: usize,
    max_nodes: usize,
    built: usize,
    /// Set once the node budget is spent; every open child list stops there
    exhausted: bool,
    /// Ids on the current recursion path
    stack: Vec<String>,
    diagnostics: Vec<TreeDiagnostic>,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, id: &str, parent: Option<&str>, scope: Option<&str>, depth: usize) -> ResolvedNode {
        let surface = self.surface;
        if self.built >= self.max_nodes {
            log::warn!(
                "[A2UI] surface `{}` stopped at `{}` after {} nodes",
                surface.id,
                id,
                self.max_nodes
            );
            self.exhausted = true;
            self.diagnostics.push(TreeDiagnostic::BudgetExhausted {
                id: id.to_string(),
                limit: self.max_nodes,
            });
            return ResolvedNode::BudgetExhausted { id: id.to_string() };
        }
        self.built += 1;

        if self.stack.iter().any(|ancestor| ancestor == id) {
            let mut path = self.stack.clone();
            path.push(id.to_string());
            log::debug!("[A2UI] cycle at `{}` in surface `{}`", id, surface.id);
            self.diagnostics.push(TreeDiagnostic::CyclicReference {
                id: id.to_string(),
                path,
            });
            return ResolvedNode::Cycle { id: id.to_string() };
        }

        if depth >= self.max_depth {
            self.diagnostics.push(TreeDiagnostic::DepthExceeded {
                id: id.to_string(),
                depth,
            });
            return ResolvedNode::DepthExceeded { id: id.to_string() };
        }

        let Some(node) = surface.get_component(id) else {
            self.diagnostics.push(TreeDiagnostic::DanglingReference {
                parent: parent.map(str::to_string),
                id: id.to_string(),
            });
            return ResolvedNode::Missing { id: id.to_string() };
        };

        let variant = classify(node);
        let Some(kind) = variant.kind() else {
            let reason = match &variant {
                NodeVariant::Unclassified(u) => describe(&u.reason),
                _ => String::new(),
            };
            self.diagnostics.push(TreeDiagnostic::UnclassifiedNode {
                id: node.id.clone(),
                component_type: node.component_type.clone(),
                reason: reason.clone(),
            });
            return ResolvedNode::Unclassified {
                id: node.id.clone(),
                component_type: node.component_type.clone(),
                properties: node.properties.clone(),
                reason,
            };
        };

        let mut resolver = PropertyResolver::new(&surface.data_model, scope);
        resolver.resolve_variant(&variant);

        self.stack.push(id.to_string());
        let mut children = Vec::new();
        for slot in variant.child_slots() {
            if self.exhausted {
                break;
            }
            match slot {
                ChildSlot::Node(child) => {
                    children.push(self.build(child, Some(id), scope, depth + 1));
                }
                ChildSlot::Template {
                    component_id,
                    data_binding,
                } => {
                    self.expand_template(id, component_id, data_binding, scope, depth, &mut children);
                }
            }
        }
        self.stack.pop();

        ResolvedNode::Component(ResolvedComponent {
            id: node.id.clone(),
            kind,
            weight: node.weight,
            scope: scope.map(str::to_string),
            properties: resolver.properties,
            bindings: resolver.bindings,
            action: variant.action().cloned(),
            children,
        })
    }

    /// One instance of `component_id` per element of the bound array.
    fn expand_template(
        &mut self,
        parent: &str,
        component_id: &str,
        data_binding: &str,
        scope: Option<&str>,
        depth: usize,
        children: &mut Vec<ResolvedNode>,
    ) {
        let base = resolve_path(data_binding, scope);
        let surface = self.surface;
        let Some(items) = surface.data_model.get_array(&base) else {
            return;
        };

        let total = items.len();
        let kept = total.min(self.max_template_items);
        if kept < total {
            log::warn!(
                "[A2UI] template `{}` under `{}` truncated to {} of {} items",
                component_id,
                parent,
                kept,
                total
            );
            self.diagnostics.push(TreeDiagnostic::TemplateTruncated {
                parent: parent.to_string(),
                total,
                kept,
            });
        }

        for index in 0..kept {
            if self.exhausted {
                break;
            }
            let item_scope = join_path(&base, &index.to_string());
            children.push(self.build(component_id, Some(parent), Some(&item_scope), depth + 1));
        }
    }
}

fn describe(reason: &UnclassifiedReason) -> String {
    match reason {
        UnclassifiedReason::UnknownType => "unknown component type".to_string(),
        UnclassifiedReason::InvalidProperties(why) => format!("invalid properties: {}", why),
    }
}

/// Collects resolved properties for one node.
struct PropertyResolver<'m> {
    model: &'m DataModel,
    scope: Option<&'m str>,
    properties: IndexMap<String, PropertyValue>,
    bindings: IndexMap<String, String>,
}

impl<'m> PropertyResolver<'m> {
    fn new(model: &'m DataModel, scope: Option<&'m str>) -> Self {
        PropertyResolver {
            model,
            scope,
            properties: IndexMap::new(),
            bindings: IndexMap::new(),
        }
    }

    fn bound(&mut self, key: &str, path: Option<&str>, resolved: Option<Scalar>) {
        if let Some(path) = path {
            self.bindings.insert(key.to_string(), resolve_path(path, self.scope));
        }
        let value = resolved.map_or(PropertyValue::Absent, PropertyValue::Scalar);
        self.properties.insert(key.to_string(), value);
    }

    fn string(&mut self, key: &str, value: &StringValue) {
        let resolved = value.resolve_scoped(self.model, self.scope).map(Scalar::String);
        self.bound(key, value.path.as_deref(), resolved);
    }

    fn opt_string(&mut self, key: &str, value: Option<&StringValue>) {
        if let Some(value) = value {
            self.string(key, value);
        }
    }

    fn number(&mut self, key: &str, value: &NumberValue) {
        let resolved = value.resolve_scoped(self.model, self.scope).map(Scalar::Number);
        self.bound(key, value.path.as_deref(), resolved);
    }

    fn boolean(&mut self, key: &str, value: &BooleanValue) {
        let resolved = value.resolve_scoped(self.model, self.scope).map(Scalar::Boolean);
        self.bound(key, value.path.as_deref(), resolved);
    }

    fn primitive(&mut self, key: &str, value: &PrimitiveValue) {
        let resolved = value.resolve_scoped(self.model, self.scope);
        self.bound(key, value.path.as_deref(), resolved);
    }

    /// Plain values: scalars stay scalars, everything else is structural.
    fn plain<T: Serialize>(&mut self, key: &str, value: Option<T>) {
        let Some(value) = value.and_then(|v| serde_json::to_value(v).ok()) else {
            return;
        };
        let value = match Scalar::from_json(&value) {
            Some(scalar) => PropertyValue::Scalar(scalar),
            None => PropertyValue::Structural(value),
        };
        self.properties.insert(key.to_string(), value);
    }

    fn resolve_text(&self, value: &StringValue) -> Value {
        value
            .resolve_scoped(self.model, self.scope)
            .map_or(Value::Null, Value::String)
    }

    fn resolve_variant(&mut self, variant: &NodeVariant) {
        match variant {
            NodeVariant::Column(c) => {
                self.plain("alignment", c.alignment);
                self.plain("distribution", c.distribution);
            }
            NodeVariant::Row(r) => {
                self.plain("alignment", r.alignment);
                self.plain("distribution", r.distribution);
            }
            NodeVariant::List(l) => self.plain("direction", l.direction),
            NodeVariant::Card(c) => self.plain("elevation", c.elevation),
            NodeVariant::Text(t) => {
                self.string("text", &t.text);
                self.plain("usageHint", t.usage_hint);
            }
            NodeVariant::Badge(b) => {
                self.string("text", &b.text);
                self.plain("variant", b.variant);
            }
            NodeVariant::Image(i) => {
                self.string("url", &i.url);
                self.plain("fit", i.fit);
                self.plain("usageHint", i.usage_hint);
            }
            NodeVariant::Icon(i) => {
                self.string("name", &i.name);
                self.plain("size", i.size);
            }
            NodeVariant::Divider(d) => self.plain("orientation", d.orientation),
            NodeVariant::Button(b) => {
                self.opt_string("label", b.label.as_ref());
                self.plain("primary", b.primary);
            }
            NodeVariant::TextField(t) => {
                self.string("text", &t.text);
                self.opt_string("label", t.label.as_ref());
                self.opt_string("placeholder", t.placeholder.as_ref());
                self.plain("inputType", t.input_type);
            }
            NodeVariant::Checkbox(c) => {
                self.boolean("value", &c.value);
                self.opt_string("label", c.label.as_ref());
            }
            NodeVariant::Slider(s) => {
                self.number("value", &s.value);
                self.plain("min", s.min);
                self.plain("max", s.max);
                self.plain("step", s.step);
            }
            NodeVariant::Select(s) => {
                self.string("value", &s.value);
                let options: Vec<Value> = s
                    .options
                    .iter()
                    .map(|o| serde_json::json!({"value": o.value, "label": self.resolve_text(&o.label)}))
                    .collect();
                self.properties
                    .insert("options".to_string(), PropertyValue::Structural(Value::Array(options)));
                self.plain("multiSelect", s.multi_select);
            }
            NodeVariant::Modal(m) => self.boolean("visible", &m.visible),
            NodeVariant::Tabs(t) => {
                let tabs: Vec<Value> = t
                    .tabs
                    .iter()
                    .map(|tab| serde_json::json!({"id": tab.id, "label": self.resolve_text(&tab.label)}))
                    .collect();
                self.properties
                    .insert("tabs".to_string(), PropertyValue::Structural(Value::Array(tabs)));
                self.opt_string("selected", t.selected.as_ref());
            }
            NodeVariant::Custom(c) => {
                self.plain("name", c.name.as_ref());
                for (key, value) in &c.properties {
                    match PrimitiveValue::from_json(value) {
                        Some(binding) => self.primitive(key, &binding),
                        None => self.plain(key, Some(value)),
                    }
                }
            }
            NodeVariant::Unclassified(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2ui::node::ComponentNode;
    use serde_json::json;

    fn surface(root: &str, nodes: Vec<ComponentNode>, data: Value) -> Surface {
        let mut surface = Surface::new("s1");
        surface.root = Some(root.to_string());
        surface.data_model = DataModel::with_data(data);
        for node in nodes {
            surface.components.insert(node.id.clone(), node);
        }
        surface
    }

    fn column(id: &str, children: &[&str]) -> ComponentNode {
        ComponentNode::new(id, "Column").with_property("children", json!({"explicitList": children}))
    }

    fn text(id: &str, value: Value) -> ComponentNode {
        ComponentNode::new(id, "Text").with_property("text", value)
    }

    #[test]
    fn test_resolves_bound_text() {
        let s = surface(
            "root",
            vec![text("root", json!({"path": "/greeting"}))],
            json!({"greeting": "Hello"}),
        );
        let tree = build_tree(&s, &ProcessorConfig::default());
        let root = tree.root.as_component().unwrap();
        assert_eq!(root.kind, ComponentKind::Text);
        assert_eq!(root.text("text"), Some("Hello"));
        assert_eq!(root.binding_path("text"), Some("/greeting"));
        assert!(tree.diagnostics.is_empty());
    }

    #[test]
    fn test_unresolved_binding_is_absent() {
        let s = surface("root", vec![text("root", json!({"path": "/nope"}))], json!({}));
        let tree = build_tree(&s, &ProcessorConfig::default());
        let root = tree.root.as_component().unwrap();
        assert_eq!(root.property("text"), Some(&PropertyValue::Absent));
    }

    #[test]
    fn test_cycle_is_contained() {
        let s = surface(
            "root",
            vec![
                column("root", &["a", "ok"]),
                column("a", &["b"]),
                column("b", &["a"]),
                text("ok", json!("fine")),
            ],
            json!({}),
        );
        let tree = build_tree(&s, &ProcessorConfig::default());

        let root = tree.root.as_component().unwrap();
        let a = root.children[0].as_component().unwrap();
        let b = a.children[0].as_component().unwrap();
        assert_eq!(b.children[0], ResolvedNode::Cycle { id: "a".into() });
        assert_eq!(tree.find("ok").and_then(|n| n.text("text")), Some("fine"));
        assert_eq!(
            tree.diagnostics,
            vec![TreeDiagnostic::CyclicReference {
                id: "a".into(),
                path: vec!["root".into(), "a".into(), "b".into(), "a".into()],
            }]
        );
    }

    #[test]
    fn test_self_reference_root() {
        let s = surface("root", vec![column("root", &["root"])], json!({}));
        let tree = build_tree(&s, &ProcessorConfig::default());
        assert_eq!(
            tree.root.children(),
            &[ResolvedNode::Cycle { id: "root".into() }]
        );
    }

    #[test]
    fn test_dangling_reference() {
        let s = surface("root", vec![column("root", &["ghost", "t"]), text("t", json!("x"))], json!({}));
        let tree = build_tree(&s, &ProcessorConfig::default());
        assert_eq!(tree.root.children()[0], ResolvedNode::Missing { id: "ghost".into() });
        assert!(tree.root.children()[1].as_component().is_some());
        assert_eq!(
            tree.diagnostics,
            vec![TreeDiagnostic::DanglingReference {
                parent: Some("root".into()),
                id: "ghost".into()
            }]
        );
    }

    #[test]
    fn test_missing_root_and_no_root() {
        let s = surface("nowhere", vec![], json!({}));
        let tree = build_tree(&s, &ProcessorConfig::default());
        assert_eq!(tree.root, ResolvedNode::Missing { id: "nowhere".into() });

        let tree = build_tree(&Surface::new("bare"), &ProcessorConfig::default());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_unknown_node_keeps_siblings() {
        let s = surface(
            "root",
            vec![
                column("root", &["holo", "t"]),
                ComponentNode::new("holo", "Hologram").with_property("depth", json!(3)),
                text("t", json!({"literalString": "still here"})),
            ],
            json!({}),
        );
        let tree = build_tree(&s, &ProcessorConfig::default());
        match &tree.root.children()[0] {
            ResolvedNode::Unclassified {
                component_type,
                properties,
                ..
            } => {
                assert_eq!(component_type, "Hologram");
                assert_eq!(properties.get("depth"), Some(&json!(3)));
            }
            other => panic!("Expected Unclassified, got {:?}", other),
        }
        assert_eq!(tree.find("t").and_then(|n| n.text("text")), Some("still here"));
    }

    #[test]
    fn test_template_children_are_scoped() {
        let s = surface(
            "list",
            vec![
                ComponentNode::new("list", "List").with_property(
                    "children",
                    json!({"template": {"componentId": "item", "dataBinding": "/products"}}),
                ),
                text("item", json!({"path": "name"})),
            ],
            json!({"products": [{"name": "Lamp"}, {"name": "Desk"}]}),
        );
        let tree = build_tree(&s, &ProcessorConfig::default());
        let items: Vec<(Option<&str>, Option<&str>)> = tree
            .root
            .children()
            .iter()
            .filter_map(ResolvedNode::as_component)
            .map(|c| (c.scope.as_deref(), c.text("text")))
            .collect();
        assert_eq!(
            items,
            vec![(Some("/products/0"), Some("Lamp")), (Some("/products/1"), Some("Desk"))]
        );
    }

    #[test]
    fn test_template_truncation() {
        let s = surface(
            "list",
            vec![
                ComponentNode::new("list", "List").with_property(
                    "children",
                    json!({"template": {"componentId": "item", "dataBinding": "/n"}}),
                ),
                ComponentNode::new("item", "Divider"),
            ],
            json!({"n": [1, 2, 3, 4, 5]}),
        );
        let config = ProcessorConfig {
            max_template_items: 2,
            ..Default::default()
        };
        let tree = build_tree(&s, &config);
        assert_eq!(tree.root.children().len(), 2);
        assert_eq!(
            tree.diagnostics,
            vec![TreeDiagnostic::TemplateTruncated {
                parent: "list".into(),
                total: 5,
                kept: 2
            }]
        );
    }

    #[test]
    fn test_depth_limit() {
        let nodes: Vec<ComponentNode> = (0..10)
            .map(|i| column(&format!("n{}", i), &[format!("n{}", i + 1).as_str()]))
            .collect();
        let s = surface("n0", nodes, json!({}));
        let tree = build_tree(&s, &ProcessorConfig::default().with_max_depth(3));

        let mut node = &tree.root;
        for _ in 0..3 {
            node = &node.children()[0];
        }
        assert_eq!(node, &ResolvedNode::DepthExceeded { id: "n3".into() });
        assert!(matches!(tree.diagnostics[0], TreeDiagnostic::DepthExceeded { depth: 3, .. }));
    }

    fn count_nodes(node: &ResolvedNode) -> usize {
        1 + node.children().iter().map(count_nodes).sum::<usize>()
    }

    #[test]
    fn test_node_budget_stops_shared_fan_out() {
        // Every column lists its successor twice, doubling the tree per level.
        let nodes: Vec<ComponentNode> = (0..40)
            .map(|i| {
                let next = format!("n{}", i + 1);
                column(&format!("n{}", i), &[next.as_str(), next.as_str()])
            })
            .collect();
        let s = surface("n0", nodes, json!({}));
        let tree = build_tree(&s, &ProcessorConfig::default().with_max_nodes(100));

        assert_eq!(count_nodes(&tree.root), 101);
        assert!(tree.find("n0").is_some());

        let exhausted: Vec<&TreeDiagnostic> = tree
            .diagnostics
            .iter()
            .filter(|d| matches!(d, TreeDiagnostic::BudgetExhausted { limit: 100, .. }))
            .collect();
        assert_eq!(exhausted.len(), 1);
    }

    #[test]
    fn test_node_budget_stops_template_expansion() {
        let s = surface(
            "list",
            vec![
                ComponentNode::new("list", "List").with_property(
                    "children",
                    json!({"template": {"componentId": "item", "dataBinding": "/n"}}),
                ),
                ComponentNode::new("item", "Divider"),
            ],
            json!({"n": [1, 2, 3, 4, 5, 6, 7, 8]}),
        );
        let tree = build_tree(&s, &ProcessorConfig::default().with_max_nodes(4));

        let children = tree.root.children();
        assert_eq!(children.len(), 4);
        assert_eq!(children[3], ResolvedNode::BudgetExhausted { id: "item".into() });
    }

    #[test]
    fn test_select_and_tabs_structural_properties() {
        let s = surface(
            "tabs",
            vec![
                ComponentNode::new("tabs", "Tabs").with_property(
                    "tabs",
                    json!([{"id": "one", "label": {"path": "/title"}, "content": "pick"}]),
                ),
                ComponentNode::new("pick", "Select")
                    .with_property("value", json!({"path": "/choice"}))
                    .with_property("options", json!([{"value": "a", "label": "Apple"}])),
            ],
            json!({"title": "Fruit", "choice": "a"}),
        );
        let tree = build_tree(&s, &ProcessorConfig::default());
        let tabs = tree.root.as_component().unwrap();
        assert_eq!(
            tabs.property("tabs"),
            Some(&PropertyValue::Structural(json!([{"id": "one", "label": "Fruit"}])))
        );
        let pick = tree.find("pick").unwrap();
        assert_eq!(pick.text("value"), Some("a"));
        assert_eq!(
            pick.property("options"),
            Some(&PropertyValue::Structural(json!([{"value": "a", "label": "Apple"}])))
        );
    }

    #[test]
    fn test_custom_properties() {
        let s = surface(
            "chart",
            vec![ComponentNode::new("chart", "Custom")
                .with_property("name", json!("BarChart"))
                .with_property("total", json!({"path": "/sum"}))
                .with_property("series", json!([1, 2]))],
            json!({"sum": 3}),
        );
        let tree = build_tree(&s, &ProcessorConfig::default());
        let chart = tree.root.as_component().unwrap();
        assert_eq!(chart.text("name"), Some("BarChart"));
        assert_eq!(chart.number("total"), Some(3.0));
        assert_eq!(chart.property("series"), Some(&PropertyValue::Structural(json!([1, 2]))));
    }

    #[test]
    fn test_serialized_shape() {
        let s = surface("root", vec![text("root", json!("Hi"))], json!({}));
        let tree = build_tree(&s, &ProcessorConfig::default());
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["root"]["node"], json!("component"));
        assert_eq!(json["root"]["kind"], json!("Text"));
        assert_eq!(json["root"]["properties"]["text"], json!("Hi"));
    }
}
