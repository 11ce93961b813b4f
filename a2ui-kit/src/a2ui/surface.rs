//! A2UI Surface Registry
//!
//! Owns the active surfaces. A surface is created by the first message that
//! names it and lives until it is cleared.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::data_model::DataModel;
use super::message::SurfaceStyles;
use super::node::ComponentNode;

/// A UI surface: component nodes, a root pointer and a data model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    /// Surface ID
    pub id: String,

    /// Root component ID, unset until a tree or `beginRendering` names one
    pub root: Option<String>,

    /// Style configuration
    pub styles: Option<SurfaceStyles>,

    /// Component definitions by ID
    pub components: HashMap<String, ComponentNode>,

    pub data_model: DataModel,
}

impl Surface {
    pub fn new(id: impl Into<String>) -> Self {
        Surface {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Get a component by ID
    pub fn get_component(&self, id: &str) -> Option<&ComponentNode> {
        self.components.get(id)
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }
}

/// The set of active surfaces, in creation order.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: IndexMap<String, Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a surface, creating an empty one if it does not exist yet.
    pub fn create_or_get(&mut self, surface_id: &str) -> &mut Surface {
        self.surfaces
            .entry(surface_id.to_string())
            .or_insert_with(|| Surface::new(surface_id))
    }

    pub fn get(&self, surface_id: &str) -> Option<&Surface> {
        self.surfaces.get(surface_id)
    }

    pub fn contains(&self, surface_id: &str) -> bool {
        self.surfaces.contains_key(surface_id)
    }

    /// Drop a surface with its nodes and data model.
    pub fn clear(&mut self, surface_id: &str) -> Option<Surface> {
        self.surfaces.shift_remove(surface_id)
    }

    /// Drop every surface, returning the ids that existed.
    pub fn clear_all(&mut self) -> Vec<String> {
        self.surfaces.drain(..).map(|(id, _)| id).collect()
    }

    /// Surface IDs in creation order
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.surfaces.keys()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_on_first_access() {
        let mut registry = SurfaceRegistry::new();
        assert!(registry.get("main").is_none());

        registry.create_or_get("main").root = Some("root".into());
        assert_eq!(registry.get("main").and_then(Surface::root), Some("root"));

        // Second access returns the same surface
        assert_eq!(registry.create_or_get("main").root(), Some("root"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_keep_creation_order() {
        let mut registry = SurfaceRegistry::new();
        for id in ["b", "a", "c"] {
            registry.create_or_get(id);
        }
        registry.clear("a");
        let ids: Vec<&String> = registry.ids().collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_clear_all() {
        let mut registry = SurfaceRegistry::new();
        registry.create_or_get("x");
        registry.create_or_get("y");
        assert_eq!(registry.clear_all(), vec!["x".to_string(), "y".to_string()]);
        assert!(registry.is_empty());
    }
}
