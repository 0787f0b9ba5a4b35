//! Lumen DOM - Document tree
//!
//! Arena-backed node tree shared by live documents and serialized snapshots.

mod geometry;
mod node;
mod snapshot;
mod tree;

pub use geometry::Rect;
pub use node::{Attribute, ElementData, Node, NodeData, PseudoElement};
pub use snapshot::Snapshot;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is the sentinel
    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tree construction errors
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Node {0:?} cannot have children")]
    NotAContainer(NodeId),

    #[error("Node {0:?} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("Appending {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
