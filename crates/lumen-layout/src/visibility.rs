//! Rendered visibility

use lumen_css::{Display, Visibility};

use crate::VirtualNode;

/// Product of `opacity` over the node and its ancestors
pub fn cumulative_opacity<N: VirtualNode>(node: N) -> f64 {
    std::iter::once(node)
        .chain(node.ancestors())
        .filter_map(|n| n.style().map(|s| s.opacity))
        .product()
}

/// Clipped away by an ancestor whose `overflow` clips
///
/// Only decidable when both boxes are known.
pub fn is_clipped<N: VirtualNode>(node: N) -> bool {
    let Some(own) = node.border_box() else {
        return false;
    };
    node.ancestors().any(|a| {
        let clips = a.style().is_some_and(|s| s.overflow.clips());
        match (clips, a.border_box()) {
            (true, Some(clip)) => clip.is_empty() || clip.intersection(&own).is_none_or(|r| r.is_empty()),
            _ => false,
        }
    })
}

/// Whether the node paints at all
///
/// Nodes without style information are assumed visible; text nodes take
/// the visibility of their parent element.
pub fn is_visible<N: VirtualNode>(node: N) -> bool {
    let element = if node.is_element() { Some(node) } else { node.parent() };
    let Some(element) = element else {
        return true;
    };
    let Some(style) = element.style() else {
        return true;
    };
    if style.visibility != Visibility::Visible {
        return false;
    }
    let displayed = std::iter::once(element)
        .chain(element.ancestors())
        .all(|n| n.style().is_none_or(|s| s.display != Display::None));
    displayed && cumulative_opacity(element) > 0.0 && !is_clipped(element)
}
