//! A2UI User Actions
//!
//! Turns an action declared on a component into an outgoing [`UserAction`],
//! resolving its context bindings against the surface data model.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::data_model::DataModel;
use super::value::PrimitiveValue;

/// Action definition for interactive components
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDefinition {
    /// Action name (e.g., "addToCart", "submit")
    pub name: String,

    /// Context values to include with the action
    #[serde(default)]
    pub context: Vec<ActionContextItem>,
}

/// A single context item for an action.
///
/// LLMs sometimes generate malformed context items (e.g. `{"path": "/x"}`
/// instead of `{"key": "x", "value": {"path": "/x"}}`). Fields are
/// defaulted to make deserialization lenient; keyless items are skipped at
/// dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContextItem {
    #[serde(default)]
    pub key: String,

    /// Value (literal or path-bound)
    #[serde(default)]
    pub value: PrimitiveValue,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        ActionDefinition {
            name: name.into(),
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: PrimitiveValue) -> Self {
        self.context.push(ActionContextItem {
            key: key.into(),
            value,
        });
        self
    }
}

/// Values supplied by the renderer at the moment of interaction, such as the
/// current contents of a text field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuntimeContext {
    values: IndexMap<String, Value>,
}

impl RuntimeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An outbound user action. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
    #[serde(rename = "name")]
    action_name: String,
    surface_id: String,
    source_component_id: String,
    timestamp: DateTime<Utc>,
    context: IndexMap<String, Value>,
}

impl UserAction {
    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    pub fn source_component_id(&self) -> &str {
        &self.source_component_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Resolved context. Bindings that resolved to nothing are `null`.
    pub fn context(&self) -> &IndexMap<String, Value> {
        &self.context
    }

    /// Wrap the action in the envelope the agent expects:
    /// `{"userAction": {"name", "surfaceId", "sourceComponentId", "timestamp", "context"}}`.
    pub fn to_message(&self) -> Value {
        serde_json::json!({ "userAction": self })
    }
}

/// Everything the dispatcher needs to know about where an action came from.
#[derive(Debug, Clone, Copy)]
pub struct ActionSource<'a> {
    pub surface_id: &'a str,
    pub component_id: &'a str,
    /// Template scope of the component instance, for relative paths
    pub scope: Option<&'a str>,
}

/// Build a [`UserAction`] stamped with the current time.
pub fn dispatch(
    source: ActionSource<'_>,
    action: &ActionDefinition,
    data_model: &DataModel,
    runtime: &RuntimeContext,
) -> UserAction {
    dispatch_at(source, action, data_model, runtime, Utc::now())
}

/// Build a [`UserAction`] with an explicit timestamp.
///
/// Declared context entries are resolved first; runtime values are applied
/// afterwards and replace declared entries that share their key.
pub fn dispatch_at(
    source: ActionSource<'_>,
    action: &ActionDefinition,
    data_model: &DataModel,
    runtime: &RuntimeContext,
    timestamp: DateTime<Utc>,
) -> UserAction {
    let mut context = IndexMap::new();

    for item in &action.context {
        if item.key.is_empty() {
            log::warn!(
                "[A2UI] skipping keyless context item on action `{}` of `{}`",
                action.name,
                source.component_id
            );
            continue;
        }
        let value = item
            .value
            .resolve_scoped(data_model, source.scope)
            .map(|scalar| scalar.to_json())
            .unwrap_or(Value::Null);
        context.insert(item.key.clone(), value);
    }

    for (key, value) in &runtime.values {
        context.insert(key.clone(), value.clone());
    }

    UserAction {
        action_name: action.name.clone(),
        surface_id: source.surface_id.to_string(),
        source_component_id: source.component_id.to_string(),
        timestamp,
        context,
    }
}
