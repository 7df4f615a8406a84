//! Last known active status of the validator.
//!
//! `operator-cli status` only reports identity data (`nodeInfo`) while the
//! node is active. The dashboard still wants to show which node it is after
//! it goes inactive, so the most recent active snapshot is kept and its
//! `nodeInfo` is copied into inactive responses.

use operator_cli::{NodeState, NodeStatus};
use tokio::sync::RwLock;
use tracing::debug;

/// Single-slot cache of the most recent active [`NodeStatus`].
///
/// Only [`StatusCache::observe`] mutates the slot:
///
/// - `active`: the fresh status replaces the cached one and is returned as is.
/// - `inactive`: the cache is left alone; the fresh status is returned with
///   its `nodeInfo` replaced by the cached one (absent if nothing is cached).
/// - `standby`, `syncing`: returned as is; the cache is left alone.
#[derive(Debug, Default)]
pub struct StatusCache {
    last_active: RwLock<Option<NodeStatus>>,
}

impl StatusCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly polled status and return the status to report.
    pub async fn observe(&self, fresh: NodeStatus) -> NodeStatus {
        match fresh.state {
            NodeState::Active => {
                let mut last_active = self.last_active.write().await;
                *last_active = Some(fresh.clone());
                debug!("cached active node status");
                fresh
            }
            NodeState::Inactive => {
                let last_active = self.last_active.read().await;
                let node_info = last_active
                    .as_ref()
                    .and_then(|status| status.node_info.clone());
                NodeStatus { node_info, ..fresh }
            }
            NodeState::Standby | NodeState::Syncing => fresh,
        }
    }

    /// The cached active status, if any.
    pub async fn last_active(&self) -> Option<NodeStatus> {
        self.last_active.read().await.clone()
    }
}
