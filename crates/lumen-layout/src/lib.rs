//! Lumen Layout
//!
//! Rendered geometry the host measured, the node capability interface the
//! checks consume, paint order, and overlap detection.

mod document;
mod layout_tree;
pub mod overlap;
pub mod stacking;
mod virtual_node;
pub mod visibility;

pub use document::{DocumentBuilder, ElementSpec, LiveNode, RenderedDocument};
pub use layout_tree::{LayoutBox, LayoutTree, generated_box};
pub use overlap::OverlapDetector;
pub use stacking::{PaintOrder, StackingKey, StackingLevel};
pub use virtual_node::{Provenance, SnapshotNode, VirtualNode};

pub use lumen_dom::{NodeId, PseudoElement, Rect};

/// Layout errors
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error(transparent)]
    Dom(#[from] lumen_dom::DomError),
}
