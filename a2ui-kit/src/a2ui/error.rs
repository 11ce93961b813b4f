//! A2UI error types.

use thiserror::Error;

/// Result type for A2UI processing.
pub type A2uiResult<T> = Result<T, A2uiError>;

/// Errors raised while decoding or applying a single protocol message.
///
/// None of these abort a batch: the processor records the error against the
/// offending message and moves on.
#[derive(Debug, Error)]
pub enum A2uiError {
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("unknown component type `{component_type}` on node `{node_id}`")]
    UnknownNodeType {
        node_id: String,
        component_type: String,
    },

    #[error("invalid properties for {component_type} node `{node_id}`: {reason}")]
    InvalidProperties {
        node_id: String,
        component_type: String,
        reason: String,
    },

    #[error("duplicate node id `{0}` in component list")]
    DuplicateNodeId(String),

    #[error("{0} must not be empty")]
    EmptyId(&'static str),

    #[error("invalid data model path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("user actions are outbound only and cannot be processed")]
    OutboundOnly,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl A2uiError {
    /// Shorthand for a [`A2uiError::MalformedMessage`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        A2uiError::MalformedMessage(reason.into())
    }
}
