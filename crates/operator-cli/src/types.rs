//! Records parsed from `operator-cli` YAML output.
//!
//! Field names follow the CLI's camelCase keys so the records can be handed
//! to the dashboard as JSON unchanged. Fields this crate does not model are
//! kept and passed through.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of the validator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Validating.
    Active,
    /// Staked and waiting to be rotated in.
    Standby,
    /// Catching up with the network.
    Syncing,
    /// Not participating.
    Inactive,
}

impl NodeState {
    /// The wire name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Standby => "standby",
            Self::Syncing => "syncing",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address and identity data of the node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeInfo(Map<String, Value>);

impl NodeInfo {
    /// Create an empty node info block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Output of `operator-cli status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    /// Current lifecycle state.
    pub state: NodeState,
    /// Identity data, reported while active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_info: Option<NodeInfo>,
    /// Any other fields reported by the CLI.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeStatus {
    /// Create a status with no node info or extra fields.
    #[must_use]
    pub fn new(state: NodeState) -> Self {
        Self {
            state,
            node_info: None,
            extra: Map::new(),
        }
    }

    /// Attach node info.
    #[must_use]
    pub fn with_node_info(mut self, node_info: NodeInfo) -> Self {
        self.node_info = Some(node_info);
        self
    }

    /// Add a pass-through field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Output of `operator-cli version`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeVersion(Map<String, Value>);

impl NodeVersion {
    /// Look up a version field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All version fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
