//! Processor configuration.

use serde::{Deserialize, Serialize};

use super::error::A2uiResult;

/// What the processor does with a node whose `type` tag it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownNodePolicy {
    /// Keep the node and surface it to renderers as an unclassified fallback.
    #[default]
    Fallback,
    /// Reject the message that carries the node.
    Error,
}

/// Options recognized by [`A2uiMessageProcessor`](super::A2uiMessageProcessor).
///
/// Every field has a default, so a partial JSON document is a valid config:
///
/// ```text
/// { "onUnknownNode": "error", "maxDepth": 32 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorConfig {
    /// Policy for unrecognized node type tags
    pub on_unknown_node: UnknownNodePolicy,

    /// Deepest nesting the tree builder descends to before emitting a
    /// `DepthExceeded` marker
    pub max_depth: usize,

    /// Upper bound on instances produced by a single template child list
    pub max_template_items: usize,

    /// Upper bound on nodes resolved in one tree build. Shared references and
    /// nested templates can multiply a small node map into a huge tree, so
    /// the builder stops at this many and leaves a `BudgetExhausted` marker.
    pub max_nodes: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            on_unknown_node: UnknownNodePolicy::Fallback,
            max_depth: 64,
            max_template_items: 1000,
            max_nodes: 10_000,
        }
    }
}

impl ProcessorConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> A2uiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_unknown_node_policy(mut self, policy: UnknownNodePolicy) -> Self {
        self.on_unknown_node = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
