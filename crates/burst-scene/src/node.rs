//! Node information snapshots

use burst_core::{NodeId, Transform};
use serde::{Deserialize, Serialize};

/// Snapshot of a node for diagnostics and serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub transform: Transform,
    pub visible: bool,
    pub has_mesh: bool,
}
