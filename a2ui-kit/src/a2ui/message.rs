//! A2UI Protocol Message Types
//!
//! This module defines the Rust types for the inbound A2UI protocol messages.
//! Messages are serialized/deserialized using serde_json.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{A2uiError, A2uiResult};
use super::node::ComponentNode;

/// Top-level inbound message.
///
/// Each variant corresponds to one protocol operation; all of them are scoped
/// to a single surface. Protocol v0.8 names (`surfaceUpdate`, `deleteSurface`)
/// are accepted as aliases of the operations they map onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProtocolMessage {
    /// Swap the whole node map and root of a surface
    ReplaceTree(ReplaceTree),

    /// Upsert a subset of nodes
    #[serde(alias = "surfaceUpdate")]
    PatchTree(PatchTree),

    /// Overwrite the data model subtree at a path
    SetData(DataUpdate),

    /// Shallow-merge into the data model at a path
    MergeData(DataUpdate),

    /// Drop a surface's nodes and data model
    #[serde(alias = "deleteSurface")]
    ClearSurface(ClearSurface),

    /// Create a surface and point it at a root (v0.8)
    BeginRendering(BeginRendering),

    /// Typed data model contents (v0.8)
    DataModelUpdate(DataModelUpdate),
}

impl ProtocolMessage {
    /// Get the surface ID this message applies to
    pub fn surface_id(&self) -> &str {
        match self {
            ProtocolMessage::ReplaceTree(m) => &m.surface_id,
            ProtocolMessage::PatchTree(m) => &m.surface_id,
            ProtocolMessage::SetData(m) => &m.surface_id,
            ProtocolMessage::MergeData(m) => &m.surface_id,
            ProtocolMessage::ClearSurface(m) => &m.surface_id,
            ProtocolMessage::BeginRendering(m) => &m.surface_id,
            ProtocolMessage::DataModelUpdate(m) => &m.surface_id,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolMessage::ReplaceTree(_) => "replaceTree",
            ProtocolMessage::PatchTree(_) => "patchTree",
            ProtocolMessage::SetData(_) => "setData",
            ProtocolMessage::MergeData(_) => "mergeData",
            ProtocolMessage::ClearSurface(_) => "clearSurface",
            ProtocolMessage::BeginRendering(_) => "beginRendering",
            ProtocolMessage::DataModelUpdate(_) => "dataModelUpdate",
        }
    }

    /// Decode one already-parsed JSON message.
    pub fn from_value(value: Value) -> A2uiResult<Self> {
        if value.get("userAction").is_some() {
            return Err(A2uiError::OutboundOnly);
        }
        serde_json::from_value(value).map_err(|e| A2uiError::malformed(e.to_string()))
    }

    /// Best-effort surface id of a message that failed to decode.
    pub fn peek_surface_id(value: &Value) -> Option<String> {
        value
            .as_object()?
            .values()
            .next()?
            .get("surfaceId")?
            .as_str()
            .map(str::to_string)
    }
}

/// Replace the component tree of a surface.
///
/// # Example JSON
///
/// ```text
/// {
///   "replaceTree": {
///     "surfaceId": "main",
///     "root": "root",
///     "components": [
///       {"id": "root", "type": "Text", "properties": {"text": {"path": "/greeting"}}}
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceTree {
    pub surface_id: String,

    /// ID of the root component
    pub root: String,

    pub components: Vec<ComponentNode>,

    /// Optional style configuration; kept from before when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<SurfaceStyles>,
}

/// Add or update components in a surface.
///
/// # Example JSON
///
/// ```text
/// {
///   "patchTree": {
///     "surfaceId": "main",
///     "components": [
///       {"id": "header", "type": "Text", "properties": {"text": "Welcome"}}
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTree {
    pub surface_id: String,

    /// Components to add or update
    pub components: Vec<ComponentNode>,

    /// Re-point the root while patching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

/// Payload of `setData` and `mergeData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUpdate {
    pub surface_id: String,

    /// Target path (default "/")
    #[serde(default = "default_path")]
    pub path: String,

    pub value: Value,
}

fn default_path() -> String {
    "/".to_string()
}

/// Drop a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSurface {
    pub surface_id: String,
}

/// Initialize a UI surface.
///
/// # Example JSON
///
/// ```text
/// {
///   "beginRendering": {
///     "surfaceId": "main",
///     "root": "root-column",
///     "styles": {
///       "primaryColor": "#007BFF",
///       "font": "Roboto"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    pub surface_id: String,

    /// ID of the root component
    pub root: String,

    #[serde(default)]
    pub styles: Option<SurfaceStyles>,
}

/// Style configuration for a surface
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceStyles {
    /// Primary color (hex format)
    #[serde(default)]
    pub primary_color: Option<String>,

    /// Font family name
    #[serde(default)]
    pub font: Option<String>,

    /// Additional custom styles
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Update the data model with typed contents (v0.8).
///
/// The contents are merged at `path`, so keys not mentioned are kept.
///
/// # Example JSON
///
/// ```text
/// {
///   "dataModelUpdate": {
///     "surfaceId": "main",
///     "path": "/",
///     "contents": [
///       {"key": "products", "valueArray": [{"valueMap": [{"key": "name", "valueString": "Lamp"}]}]}
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdate {
    pub surface_id: String,

    /// Base path for updates (default "/")
    #[serde(default = "default_path")]
    pub path: String,

    pub contents: Vec<DataContent>,
}

impl DataModelUpdate {
    /// The contents as a single JSON object.
    pub fn to_value(&self) -> Value {
        contents_to_object(&self.contents)
    }
}

/// A single data content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataContent {
    pub key: String,

    /// Value (one of the typed variants)
    #[serde(flatten)]
    pub value: DataValue,
}

/// Data value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataValue {
    ValueString(String),
    ValueNumber(f64),
    ValueBoolean(bool),
    /// Nested map (object)
    ValueMap(Vec<DataContent>),
    ValueArray(Vec<DataValue>),
}

impl DataValue {
    /// Convert DataValue to serde_json::Value
    pub fn to_json(&self) -> Value {
        match self {
            DataValue::ValueString(s) => Value::String(s.clone()),
            DataValue::ValueNumber(n) => serde_json::json!(n),
            DataValue::ValueBoolean(b) => Value::Bool(*b),
            DataValue::ValueMap(contents) => contents_to_object(contents),
            DataValue::ValueArray(items) => Value::Array(items.iter().map(DataValue::to_json).collect()),
        }
    }
}

fn contents_to_object(contents: &[DataContent]) -> Value {
    let mut map = Map::new();
    for c in contents {
        map.insert(c.key.clone(), c.value.to_json());
    }
    Value::Object(map)
}
