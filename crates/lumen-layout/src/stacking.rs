//! Paint order
//!
//! A reduced CSS 2.2 Appendix E ordering, applied inside each stacking
//! context:
//! - Negative z-index layers (back to front)
//! - Normal-flow content, in tree order
//! - Positioned layers by z-index (`auto` paints as 0), then tree order
//!
//! Stacking contexts are formed by the document element, positioned boxes
//! with an integer z-index, fixed boxes, and boxes with opacity below 1.
//! A context paints as one unit at its own level in the parent context, so
//! nothing inside it can rise above a sibling context with a higher level.
//!
//! Within a context, non-positioned content paints at the level of its
//! nearest positioned ancestor: a later positioned sibling covers the whole
//! of an earlier one, in-flow content included.

use std::cmp::Ordering;

use lumen_css::{ComputedStyle, Position};

use crate::VirtualNode;

/// Stacking level for paint order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackingLevel {
    /// Positioned with a negative z-index
    NegativeZIndex(i32),
    /// In normal flow, outside any positioned ancestor
    NormalFlow,
    /// Positioned with z-index auto or >= 0
    Positioned(i32),
}

impl StackingLevel {
    /// Level of a positioned box with the given z-index
    pub const fn from_z_index(z_index: Option<i32>) -> Self {
        match z_index {
            Some(z) if z < 0 => Self::NegativeZIndex(z),
            Some(z) => Self::Positioned(z),
            None => Self::Positioned(0),
        }
    }

    /// Layer a box opens inside its stacking context, if any
    fn of_style(style: &ComputedStyle) -> Option<Self> {
        if style.position.is_positioned() {
            Some(Self::from_z_index(style.z_index))
        } else if style.opacity < 1.0 {
            Some(Self::Positioned(0))
        } else {
            None
        }
    }

    /// Lower values paint first (behind)
    const fn sort_key(self) -> (i32, i32) {
        match self {
            Self::NegativeZIndex(z) => (0, z),
            Self::NormalFlow => (1, 0),
            Self::Positioned(z) => (2, z),
        }
    }
}

impl PartialOrd for StackingLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StackingLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Whether `style` makes its box a stacking context
pub fn creates_stacking_context(style: &ComputedStyle) -> bool {
    (style.position.is_positioned() && style.z_index.is_some())
        || style.position == Position::Fixed
        || style.opacity < 1.0
}

/// Place of a box among the other boxes of one stacking context
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StackingKey {
    pub level: StackingLevel,
    /// Tree order of the nearest positioned ancestor-or-self inside the
    /// context (0 when there is none)
    pub root_order: usize,
    pub tree_order: usize,
}

/// Where a node sits in paint order; greater paints on top
///
/// One [`StackingKey`] per stacking context from the document element down
/// to the node. Two nodes compare at the first context where their chains
/// part; a node painted inside a context paints above the context's own box.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PaintOrder(pub Vec<StackingKey>);

impl PaintOrder {
    pub fn of<N: VirtualNode>(node: N) -> Self {
        let mut keys = Vec::new();
        let mut current = node;
        while let Some(context) = enclosing_context(current) {
            keys.push(key_within(current, context));
            current = context;
        }
        keys.reverse();
        Self(keys)
    }

    /// Number of stacking contexts enclosing the node
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

fn enclosing_context<N: VirtualNode>(node: N) -> Option<N> {
    node.ancestors()
        .find(|a| a.is_document_element() || a.style().is_some_and(creates_stacking_context))
}

fn key_within<N: VirtualNode>(node: N, context: N) -> StackingKey {
    let layer = std::iter::once(node)
        .chain(node.ancestors().take_while(|a| *a != context))
        .find_map(|n| n.style().and_then(StackingLevel::of_style).map(|level| (level, n.document_order())));
    let (level, root_order) = layer.unwrap_or((StackingLevel::NormalFlow, 0));
    StackingKey { level, root_order, tree_order: node.document_order() }
}

/// `a` is painted above `b`
pub fn paints_above<N: VirtualNode>(a: N, b: N) -> bool {
    a.paint_order() > b.paint_order()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(level: StackingLevel, root_order: usize, tree_order: usize) -> StackingKey {
        StackingKey { level, root_order, tree_order }
    }

    #[test]
    fn test_level_ordering() {
        assert!(StackingLevel::NegativeZIndex(-1) < StackingLevel::NormalFlow);
        assert!(StackingLevel::NormalFlow < StackingLevel::Positioned(0));
        assert!(StackingLevel::Positioned(0) < StackingLevel::Positioned(5));
        assert!(StackingLevel::NegativeZIndex(-5) < StackingLevel::NegativeZIndex(-1));
    }

    #[test]
    fn test_tree_order_breaks_ties() {
        let a = PaintOrder(vec![key(StackingLevel::Positioned(0), 3, 3)]);
        let b = PaintOrder(vec![key(StackingLevel::Positioned(0), 7, 7)]);
        assert!(b > a);
        let c = PaintOrder(vec![key(StackingLevel::Positioned(1), 1, 1)]);
        assert!(c > b);
    }

    #[test]
    fn test_later_positioned_box_covers_earlier_content() {
        // In-flow text at 9 inside a box positioned at 2, sibling box at 5
        let text = PaintOrder(vec![key(StackingLevel::Positioned(0), 2, 9)]);
        let cover = PaintOrder(vec![key(StackingLevel::Positioned(0), 5, 5)]);
        assert!(cover > text);
    }

    #[test]
    fn test_context_decides_before_inner_levels() {
        // Context at z 1 holding a z 100 box, against a later z 2 sibling
        let inner = PaintOrder(vec![key(StackingLevel::Positioned(1), 2, 2), key(StackingLevel::Positioned(100), 4, 4)]);
        let sibling = PaintOrder(vec![key(StackingLevel::Positioned(2), 8, 8)]);
        assert!(sibling > inner);
    }

    #[test]
    fn test_content_paints_above_its_context() {
        let context = PaintOrder(vec![key(StackingLevel::Positioned(10), 2, 2)]);
        let content = PaintOrder(vec![key(StackingLevel::Positioned(10), 2, 2), key(StackingLevel::NormalFlow, 0, 3)]);
        assert!(content > context);
        assert_eq!(content.depth(), 2);
    }

    #[test]
    fn test_auto_z_index_is_zero() {
        assert_eq!(StackingLevel::from_z_index(None), StackingLevel::Positioned(0));
        assert_eq!(StackingLevel::from_z_index(Some(-2)), StackingLevel::NegativeZIndex(-2));
    }
}
