//! A2UI Component Registry
//!
//! Maps component kinds to whatever a host renderer uses to draw them: a
//! widget name, a function pointer, a boxed trait object. The processor never
//! consults it.

use std::collections::HashMap;

use super::node::ComponentKind;
use super::tree::ResolvedNode;

/// Registry of host renderers, keyed by component kind.
///
/// Custom components are looked up by their `name` property, and nodes the
/// classifier did not recognize by their raw `type` tag. Either may fall
/// through to the fallback renderer.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry: ComponentRegistry<&str> = ComponentRegistry::new();
/// registry.register(ComponentKind::Button, "PushButton");
/// registry.set_fallback("Placeholder");
///
/// let tree = processor.get_component_tree("main");
/// let widget = registry.renderer_for(&tree.root);
/// ```
#[derive(Debug, Clone)]
pub struct ComponentRegistry<R> {
    renderers: HashMap<ComponentKind, R>,
    custom: HashMap<String, R>,
    fallback: Option<R>,
}

impl<R> Default for ComponentRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ComponentRegistry<R> {
    /// Create a new empty registry
    pub fn new() -> Self {
        ComponentRegistry {
            renderers: HashMap::new(),
            custom: HashMap::new(),
            fallback: None,
        }
    }

    /// Register a renderer for a built-in kind, returning the one it replaces.
    pub fn register(&mut self, kind: ComponentKind, renderer: R) -> Option<R> {
        self.renderers.insert(kind, renderer)
    }

    /// Register a renderer for a custom component name or an unknown tag.
    pub fn register_custom(&mut self, name: impl Into<String>, renderer: R) -> Option<R> {
        self.custom.insert(name.into(), renderer)
    }

    /// Renderer used for unclassified nodes nobody registered.
    pub fn set_fallback(&mut self, renderer: R) {
        self.fallback = Some(renderer);
    }

    pub fn get(&self, kind: ComponentKind) -> Option<&R> {
        self.renderers.get(&kind)
    }

    pub fn get_custom(&self, name: &str) -> Option<&R> {
        self.custom.get(name)
    }

    pub fn fallback(&self) -> Option<&R> {
        self.fallback.as_ref()
    }

    /// Check if a component kind is registered
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Built-in kinds that have no renderer yet
    pub fn unregistered_kinds(&self) -> Vec<ComponentKind> {
        ComponentKind::all()
            .iter()
            .copied()
            .filter(|kind| !self.contains(*kind))
            .collect()
    }

    /// Pick the renderer for a resolved node.
    ///
    /// Marker nodes (missing, cycle, depth, empty) have no renderer; hosts
    /// draw those themselves.
    pub fn renderer_for(&self, node: &ResolvedNode) -> Option<&R> {
        match node {
            ResolvedNode::Component(component) if component.kind == ComponentKind::Custom => component
                .text("name")
                .and_then(|name| self.custom.get(name))
                .or_else(|| self.get(ComponentKind::Custom))
                .or(self.fallback.as_ref()),
            ResolvedNode::Component(component) => self.get(component.kind),
            ResolvedNode::Unclassified { component_type, .. } => {
                self.custom.get(component_type).or(self.fallback.as_ref())
            }
            ResolvedNode::Missing { .. }
            | ResolvedNode::Cycle { .. }
            | ResolvedNode::DepthExceeded { .. }
            | ResolvedNode::BudgetExhausted { .. }
            | ResolvedNode::Empty => None,
        }
    }
}
