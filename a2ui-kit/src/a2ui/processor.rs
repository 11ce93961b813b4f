//! A2UI Message Processor
//!
//! Applies batches of protocol messages to the surfaces it owns and tells
//! subscribers which surfaces changed.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::action::{dispatch, ActionSource, RuntimeContext, UserAction};
use super::config::{ProcessorConfig, UnknownNodePolicy};
use super::data_model::DataModel;
use super::error::{A2uiError, A2uiResult};
use super::message::{DataUpdate, ProtocolMessage};
use super::node::{classify, ComponentNode, NodeVariant, UnclassifiedReason};
use super::subscription::{Subscription, SubscriptionHub};
use super::surface::{Surface, SurfaceRegistry};
use super::tree::{build_tree, empty_tree, ComponentTree, ResolvedComponent};

/// Events that can be emitted by the processor
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorEvent {
    SurfaceCreated {
        surface_id: String,
    },
    TreeReplaced {
        surface_id: String,
        root: String,
        component_count: usize,
    },
    TreePatched {
        surface_id: String,
        updated_components: Vec<String>,
    },
    /// Root or styles set by `beginRendering`
    SurfaceConfigured {
        surface_id: String,
        root: String,
    },
    DataModelUpdated {
        surface_id: String,
        path: String,
    },
    SurfaceCleared {
        surface_id: String,
    },
}

impl ProcessorEvent {
    pub fn surface_id(&self) -> &str {
        match self {
            ProcessorEvent::SurfaceCreated { surface_id }
            | ProcessorEvent::TreeReplaced { surface_id, .. }
            | ProcessorEvent::TreePatched { surface_id, .. }
            | ProcessorEvent::SurfaceConfigured { surface_id, .. }
            | ProcessorEvent::DataModelUpdated { surface_id, .. }
            | ProcessorEvent::SurfaceCleared { surface_id } => surface_id,
        }
    }
}

/// A message that was skipped, with its position in the batch.
#[derive(Debug)]
pub struct RejectedMessage {
    pub index: usize,
    pub surface_id: Option<String>,
    pub error: A2uiError,
}

/// What one call to `process` did.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub events: Vec<ProcessorEvent>,
    pub rejected: Vec<RejectedMessage>,
    /// Surfaces changed by the batch, in first-touched order
    pub affected_surfaces: Vec<String>,
}

impl BatchOutcome {
    /// True when every message in the batch was applied.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn touch(&mut self, surface_id: &str) {
        if !self.affected_surfaces.iter().any(|id| id == surface_id) {
            self.affected_surfaces.push(surface_id.to_string());
        }
    }
}

/// A message waiting to be applied, or the reason it could not be decoded.
type Incoming = Result<ProtocolMessage, (Option<String>, A2uiError)>;

/// The A2UI message processor.
///
/// Owns the surface registry and the subscription hub. The host constructs
/// one processor and hands references to whoever needs them; calls are
/// expected to be serialized by the host.
///
/// # Example
///
/// ```rust,ignore
/// let mut processor = A2uiMessageProcessor::default();
/// processor.subscribe_all(|surface_id| println!("changed: {}", surface_id));
///
/// let json = r#"[
///     {"replaceTree": {"surfaceId": "s1", "root": "root",
///      "components": [{"id": "root", "type": "Text", "properties": {"text": {"path": "/greeting"}}}]}},
///     {"setData": {"surfaceId": "s1", "path": "/greeting", "value": "Hello"}}
/// ]"#;
/// let outcome = processor.process_json(json)?;
/// assert!(outcome.is_clean());
///
/// let tree = processor.get_component_tree("s1");
/// ```
#[derive(Debug, Default)]
pub struct A2uiMessageProcessor {
    config: ProcessorConfig,

    /// Active surfaces by ID
    surfaces: SurfaceRegistry,

    hub: SubscriptionHub,
}

impl A2uiMessageProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        A2uiMessageProcessor {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get a surface by ID
    pub fn get_surface(&self, surface_id: &str) -> Option<&Surface> {
        self.surfaces.get(surface_id)
    }

    /// Surface IDs in creation order
    pub fn surface_ids(&self) -> impl Iterator<Item = &String> {
        self.surfaces.ids()
    }

    pub fn list_surface_ids(&self) -> Vec<String> {
        self.surfaces.ids().cloned().collect()
    }

    /// Get the data model for a surface
    pub fn get_data_model(&self, surface_id: &str) -> Option<&DataModel> {
        self.surfaces.get(surface_id).map(|s| &s.data_model)
    }

    /// Build a fresh resolved tree. Unknown surfaces yield the empty tree.
    pub fn get_component_tree(&self, surface_id: &str) -> ComponentTree {
        match self.surfaces.get(surface_id) {
            Some(surface) => build_tree(surface, &self.config),
            None => empty_tree(surface_id),
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Listen for changes to one surface.
    ///
    /// Listeners run while the processor is still mutably borrowed, so they
    /// should note the surface id and read state once `process` returns.
    pub fn subscribe(&self, surface_id: impl Into<String>, listener: impl FnMut(&str) + 'static) -> Subscription {
        self.hub.subscribe(surface_id, listener)
    }

    pub fn subscribe_all(&self, listener: impl FnMut(&str) + 'static) -> Subscription {
        self.hub.subscribe_all(listener)
    }

    // ========================================================================
    // Processing
    // ========================================================================

    /// Apply a batch of typed messages.
    pub fn process(&mut self, messages: Vec<ProtocolMessage>) -> BatchOutcome {
        self.run_batch(messages.into_iter().map(Ok).collect())
    }

    /// Apply one message as a batch of its own.
    pub fn process_message(&mut self, message: ProtocolMessage) -> BatchOutcome {
        self.process(vec![message])
    }

    /// Apply a batch of JSON messages, decoding each one separately so that a
    /// malformed entry only rejects itself.
    pub fn process_values(&mut self, values: Vec<Value>) -> BatchOutcome {
        let incoming = values
            .into_iter()
            .map(|value| {
                let surface_id = ProtocolMessage::peek_surface_id(&value);
                ProtocolMessage::from_value(value).map_err(|e| (surface_id, e))
            })
            .collect();
        self.run_batch(incoming)
    }

    /// Parse JSON text holding one message or an array of messages.
    ///
    /// Only a syntax error fails the call; shape errors reject single messages.
    pub fn process_json(&mut self, json: &str) -> A2uiResult<BatchOutcome> {
        let value: Value = serde_json::from_str(json)?;
        let values = match value {
            Value::Array(items) => items,
            single => vec![single],
        };
        Ok(self.process_values(values))
    }

    /// Write a user edit back into a surface's data model.
    pub fn write_binding(&mut self, surface_id: &str, path: &str, value: Value) -> A2uiResult<()> {
        let mut outcome = self.process_message(ProtocolMessage::SetData(DataUpdate {
            surface_id: surface_id.to_string(),
            path: path.to_string(),
            value,
        }));
        match outcome.rejected.pop() {
            Some(rejected) => Err(rejected.error),
            None => Ok(()),
        }
    }

    /// Drop a surface and notify its subscribers. Returns false if it did not exist.
    pub fn clear_surface(&mut self, surface_id: &str) -> bool {
        if self.surfaces.clear(surface_id).is_none() {
            return false;
        }
        log::debug!("[A2UI] cleared surface `{}`", surface_id);
        self.hub.notify(surface_id);
        true
    }

    /// Drop every surface, notifying each.
    pub fn clear_all(&mut self) {
        let cleared = self.surfaces.clear_all();
        self.hub.notify_batch(&cleared);
    }

    fn run_batch(&mut self, incoming: Vec<Incoming>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (index, item) in incoming.into_iter().enumerate() {
            let result = item.and_then(|message| {
                let surface_id = message.surface_id().to_string();
                let kind = message.kind();
                self.apply_isolated(message)
                    .map(|events| (surface_id.clone(), events))
                    .map_err(|e| {
                        log::debug!("[A2UI] {} for `{}` failed", kind, surface_id);
                        (Some(surface_id), e)
                    })
            });

            match result {
                Ok((surface_id, events)) => {
                    if !events.is_empty() {
                        outcome.touch(&surface_id);
                    }
                    outcome.events.extend(events);
                }
                Err((surface_id, error)) => {
                    log::warn!(
                        "[A2UI] rejected message {} (surface {:?}): {}",
                        index,
                        surface_id.as_deref().unwrap_or("?"),
                        error
                    );
                    outcome.rejected.push(RejectedMessage {
                        index,
                        surface_id,
                        error,
                    });
                }
            }
        }

        log::debug!(
            "[A2UI] batch applied: {} events, {} rejected, {} surfaces affected",
            outcome.events.len(),
            outcome.rejected.len(),
            outcome.affected_surfaces.len()
        );

        self.hub.notify_batch(&outcome.affected_surfaces);
        outcome
    }

    /// Apply one message; a surface created for a message that then fails is
    /// removed again.
    fn apply_isolated(&mut self, message: ProtocolMessage) -> A2uiResult<Vec<ProcessorEvent>> {
        let surface_id = message.surface_id().to_string();
        let existed = self.surfaces.contains(&surface_id);
        let result = self.apply(message);
        if result.is_err() && !existed {
            self.surfaces.clear(&surface_id);
        }
        result
    }

    fn apply(&mut self, message: ProtocolMessage) -> A2uiResult<Vec<ProcessorEvent>> {
        if message.surface_id().is_empty() {
            return Err(A2uiError::EmptyId("surfaceId"));
        }

        match message {
            ProtocolMessage::ReplaceTree(msg) => {
                if msg.root.is_empty() {
                    return Err(A2uiError::EmptyId("root"));
                }
                self.validate_components(&msg.components)?;

                let (surface, mut events) = self.open_surface(&msg.surface_id);
                let component_count = msg.components.len();
                surface.components = msg
                    .components
                    .into_iter()
                    .map(|node| (node.id.clone(), node))
                    .collect::<HashMap<_, _>>();
                surface.root = Some(msg.root.clone());
                if msg.styles.is_some() {
                    surface.styles = msg.styles;
                }

                events.push(ProcessorEvent::TreeReplaced {
                    surface_id: msg.surface_id,
                    root: msg.root,
                    component_count,
                });
                Ok(events)
            }

            ProtocolMessage::PatchTree(msg) => {
                if msg.root.as_deref() == Some("") {
                    return Err(A2uiError::EmptyId("root"));
                }
                self.validate_components(&msg.components)?;

                let (surface, mut events) = self.open_surface(&msg.surface_id);
                let mut updated_components = Vec::with_capacity(msg.components.len());
                for node in msg.components {
                    updated_components.push(node.id.clone());
                    surface.components.insert(node.id.clone(), node);
                }
                if let Some(root) = msg.root {
                    surface.root = Some(root);
                }

                events.push(ProcessorEvent::TreePatched {
                    surface_id: msg.surface_id,
                    updated_components,
                });
                Ok(events)
            }

            ProtocolMessage::SetData(msg) => {
                let (surface, mut events) = self.open_surface(&msg.surface_id);
                surface.data_model.set(&msg.path, msg.value)?;
                events.push(ProcessorEvent::DataModelUpdated {
                    surface_id: msg.surface_id,
                    path: msg.path,
                });
                Ok(events)
            }

            ProtocolMessage::MergeData(msg) => {
                let (surface, mut events) = self.open_surface(&msg.surface_id);
                surface.data_model.merge(&msg.path, msg.value)?;
                events.push(ProcessorEvent::DataModelUpdated {
                    surface_id: msg.surface_id,
                    path: msg.path,
                });
                Ok(events)
            }

            ProtocolMessage::DataModelUpdate(msg) => {
                let value = msg.to_value();
                let (surface, mut events) = self.open_surface(&msg.surface_id);
                surface.data_model.merge(&msg.path, value)?;
                events.push(ProcessorEvent::DataModelUpdated {
                    surface_id: msg.surface_id,
                    path: msg.path,
                });
                Ok(events)
            }

            ProtocolMessage::BeginRendering(msg) => {
                if msg.root.is_empty() {
                    return Err(A2uiError::EmptyId("root"));
                }
                let (surface, mut events) = self.open_surface(&msg.surface_id);
                surface.root = Some(msg.root.clone());
                if msg.styles.is_some() {
                    surface.styles = msg.styles;
                }
                events.push(ProcessorEvent::SurfaceConfigured {
                    surface_id: msg.surface_id,
                    root: msg.root,
                });
                Ok(events)
            }

            ProtocolMessage::ClearSurface(msg) => {
                if self.surfaces.clear(&msg.surface_id).is_none() {
                    log::debug!("[A2UI] clear of unknown surface `{}` ignored", msg.surface_id);
                    return Ok(vec![]);
                }
                Ok(vec![ProcessorEvent::SurfaceCleared {
                    surface_id: msg.surface_id,
                }])
            }
        }
    }

    /// Get or create a surface, along with a creation event if it is new.
    fn open_surface(&mut self, surface_id: &str) -> (&mut Surface, Vec<ProcessorEvent>) {
        let mut events = Vec::new();
        if !self.surfaces.contains(surface_id) {
            log::debug!("[A2UI] creating surface `{}`", surface_id);
            events.push(ProcessorEvent::SurfaceCreated {
                surface_id: surface_id.to_string(),
            });
        }
        (self.surfaces.create_or_get(surface_id), events)
    }

    fn validate_components(&self, components: &[ComponentNode]) -> A2uiResult<()> {
        let mut seen = HashSet::new();
        for node in components {
            if node.id.is_empty() {
                return Err(A2uiError::EmptyId("component id"));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(A2uiError::DuplicateNodeId(node.id.clone()));
            }
            if let NodeVariant::Unclassified(unclassified) = classify(node) {
                match unclassified.reason {
                    UnclassifiedReason::UnknownType => {
                        if self.config.on_unknown_node == UnknownNodePolicy::Error {
                            return Err(A2uiError::UnknownNodeType {
                                node_id: node.id.clone(),
                                component_type: node.component_type.clone(),
                            });
                        }
                    }
                    UnclassifiedReason::InvalidProperties(reason) => {
                        return Err(A2uiError::InvalidProperties {
                            node_id: node.id.clone(),
                            component_type: node.component_type.clone(),
                            reason,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Build the user action declared by a resolved component, using the
    /// surface's current data model. Returns `None` when the component
    /// declares no action.
    pub fn dispatch_action(
        &self,
        surface_id: &str,
        component: &ResolvedComponent,
        runtime: &RuntimeContext,
    ) -> Option<UserAction> {
        let action = component.action.as_ref()?;
        let empty = DataModel::new();
        let data_model = self.get_data_model(surface_id).unwrap_or(&empty);
        let source = ActionSource {
            surface_id,
            component_id: &component.id,
            scope: component.scope.as_deref(),
        };
        Some(dispatch(source, action, data_model, runtime))
    }
}
