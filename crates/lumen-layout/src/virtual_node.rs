//! Node capability interface
//!
//! Checks read nodes through [`VirtualNode`] so the same evaluation runs
//! against a live rendered document and against a serialized snapshot that
//! has no styles or geometry.

use std::fmt;

use lumen_css::ComputedStyle;
use lumen_dom::{DomTree, NodeId, PseudoElement, Rect};

use crate::stacking::PaintOrder;

/// Where a node's data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Rendered document with computed styles and measured geometry
    Live,
    /// Detached serialized snapshot; structure and attributes only
    Serialized,
}

/// Read-only view of a flattened-tree node
///
/// Handles are cheap `Copy` values; navigation never mutates.
pub trait VirtualNode: Copy + PartialEq + fmt::Debug {
    fn node_id(&self) -> NodeId;

    fn provenance(&self) -> Provenance;

    /// Parent element (or the element owning a text node); `None` above the
    /// document element
    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    fn is_element(&self) -> bool;

    fn is_document_element(&self) -> bool;

    /// Lowercase tag name of an element
    fn tag_name(&self) -> Option<&str>;

    /// Data of a text node
    fn text(&self) -> Option<&str>;

    fn attr(&self, name: &str) -> Option<&str>;

    fn style(&self) -> Option<&ComputedStyle>;

    /// Style of a generated `::before`/`::after` box, if it has content
    fn pseudo_style(&self, pseudo: PseudoElement) -> Option<&ComputedStyle>;

    fn border_box(&self) -> Option<Rect>;

    /// Line-box rects of inline content, one per line
    fn line_fragments(&self) -> Option<&[Rect]>;

    fn pseudo_box(&self, pseudo: PseudoElement) -> Option<Rect>;

    /// Position in a pre-order walk of the document
    fn document_order(&self) -> usize;

    fn document_element(&self) -> Option<Self>;

    /// Place in paint order; implementations may cache it
    fn paint_order(&self) -> PaintOrder {
        PaintOrder::of(*self)
    }

    /// Ancestors, nearest first
    fn ancestors(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    fn is_ancestor_of(&self, other: &Self) -> bool {
        other.ancestors().any(|a| a == *self)
    }

    /// Descendants in document order, excluding `self`
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().into_iter().rev());
        }
        out
    }

    /// Short label for logs: `div#id` or `#text`
    fn label(&self) -> String {
        match self.tag_name() {
            Some(tag) => match self.attr("id") {
                Some(id) => format!("{tag}#{id}"),
                None => tag.to_string(),
            },
            None => "#text".to_string(),
        }
    }
}

/// Node of a serialized snapshot
#[derive(Clone, Copy)]
pub struct SnapshotNode<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> SnapshotNode<'a> {
    pub fn new(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        tree.get(id)?;
        Some(Self { tree, id })
    }

    /// The snapshot's root element
    pub fn root(tree: &'a DomTree) -> Option<Self> {
        tree.document_element().map(|id| Self { tree, id })
    }

    pub fn element_by_id(tree: &'a DomTree, id: &str) -> Option<Self> {
        tree.element_by_id(id).map(|id| Self { tree, id })
    }
}

impl PartialEq for SnapshotNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl fmt::Debug for SnapshotNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnapshotNode({}, {:?})", self.label(), self.id)
    }
}

impl VirtualNode for SnapshotNode<'_> {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn provenance(&self) -> Provenance {
        Provenance::Serialized
    }

    fn parent(&self) -> Option<Self> {
        self.tree
            .parent(self.id)
            .filter(|&p| p != NodeId::ROOT)
            .map(|id| Self { tree: self.tree, id })
    }

    fn children(&self) -> Vec<Self> {
        self.tree.children(self.id).map(|id| Self { tree: self.tree, id }).collect()
    }

    fn is_element(&self) -> bool {
        self.tree.get(self.id).is_some_and(|n| n.is_element())
    }

    fn is_document_element(&self) -> bool {
        self.tree.document_element() == Some(self.id)
    }

    fn tag_name(&self) -> Option<&str> {
        self.tree.tag_name(self.id)
    }

    fn text(&self) -> Option<&str> {
        self.tree.get(self.id)?.as_text()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.tree.get(self.id)?.as_element()?.get_attr(name)
    }

    fn style(&self) -> Option<&ComputedStyle> {
        None
    }

    fn pseudo_style(&self, _pseudo: PseudoElement) -> Option<&ComputedStyle> {
        None
    }

    fn border_box(&self) -> Option<Rect> {
        None
    }

    fn line_fragments(&self) -> Option<&[Rect]> {
        None
    }

    fn pseudo_box(&self, _pseudo: PseudoElement) -> Option<Rect> {
        None
    }

    fn document_order(&self) -> usize {
        self.tree
            .preorder(NodeId::ROOT)
            .iter()
            .position(|&n| n == self.id)
            .unwrap_or(usize::MAX)
    }

    fn document_element(&self) -> Option<Self> {
        Self::root(self.tree)
    }
}
