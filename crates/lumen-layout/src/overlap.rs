//! Overlap detection
//!
//! Decides whether anything painted above a node's text hides it. Text
//! geometry is the node's line fragments (or its border box for block
//! content); each fragment is sampled at a few points along its
//! vertical center.

use lumen_css::Position;
use lumen_dom::Rect;

use crate::stacking::PaintOrder;
use crate::visibility::{cumulative_opacity, is_visible};
use crate::VirtualNode;

/// Points probed per text fragment
pub const SAMPLES_PER_FRAGMENT: usize = 3;

/// Distance from a fragment's left/right edge for the outer samples
pub const SAMPLE_INSET: f64 = 1.0;

/// Occluder boxes grow by this much before hit-testing; ambiguity at an
/// edge counts as overlap
pub const OVERLAP_TOLERANCE: f64 = 0.5;

/// Effective alpha at which a box hides what is under it
pub const OPAQUE_ALPHA: f64 = 0.99;

/// Rects covering the painted text of `node`
///
/// Inline content contributes one rect per line box, anything else its
/// border box. `None` when the host supplied no geometry.
pub fn text_fragments<N: VirtualNode>(node: N) -> Option<Vec<Rect>> {
    let style = node.style()?;
    if style.display.is_inline_level() {
        if let Some(fragments) = node.line_fragments() {
            return Some(fragments.to_vec());
        }
    }
    node.border_box().map(|b| vec![b])
}

/// Sample points for a set of fragments
pub fn sample_points(fragments: &[Rect]) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(fragments.len() * SAMPLES_PER_FRAGMENT);
    for fragment in fragments.iter().filter(|f| !f.is_empty()) {
        let (cx, cy) = fragment.center();
        let inset = SAMPLE_INSET.min(fragment.width / 2.0);
        let left = fragment.x + inset;
        let right = fragment.right() - inset;
        let span = right - left;
        for i in 0..SAMPLES_PER_FRAGMENT {
            let x = if SAMPLES_PER_FRAGMENT == 1 {
                cx
            } else {
                left + span * i as f64 / (SAMPLES_PER_FRAGMENT - 1) as f64
            };
            points.push((x, cy));
        }
    }
    points
}

/// Whether `rect` shares a non-empty area with any fragment
pub fn intersects_fragments(rect: &Rect, fragments: &[Rect]) -> bool {
    fragments
        .iter()
        .any(|f| rect.intersection(f).is_some_and(|r| !r.is_empty()))
}

/// Hides whatever it covers: an opaque background or any background image
pub fn is_opaque_cover<N: VirtualNode>(node: N) -> bool {
    let Some(style) = node.style() else {
        return false;
    };
    if style.has_background_image() {
        return true;
    }
    style.background_color.alpha * cumulative_opacity(node) >= OPAQUE_ALPHA
}

/// Geometry queries about one target node
///
/// The document is walked once, on construction, for the visible elements
/// painted above the target's text.
#[derive(Debug, Clone)]
pub struct OverlapDetector<N: VirtualNode> {
    target: N,
    fragments: Vec<Rect>,
    /// Visible elements painted above the text and touching it, topmost first
    above: Vec<N>,
}

impl<N: VirtualNode> OverlapDetector<N> {
    /// `None` when the target has no geometry to test
    pub fn new(target: N) -> Option<Self> {
        let fragments = text_fragments(target)?;
        let mut detector = Self { target, fragments, above: Vec::new() };
        detector.above = detector.elements_above();
        Some(detector)
    }

    pub fn target(&self) -> N {
        self.target
    }

    pub fn fragments(&self) -> &[Rect] {
        &self.fragments
    }

    /// Whether `rect` overlaps the target's text
    pub fn overlaps(&self, rect: &Rect) -> bool {
        intersects_fragments(rect, &self.fragments)
    }

    /// Whether `other` is the target, one of its ancestors, or a descendant
    /// that stays in flow
    fn is_in_target_flow(&self, other: N) -> bool {
        if other == self.target || other.is_ancestor_of(&self.target) {
            return true;
        }
        if !self.target.is_ancestor_of(&other) {
            return false;
        }
        // A descendant escapes flow when it or an ancestor below the target is absolute/fixed
        !std::iter::once(other)
            .chain(other.ancestors().take_while(|a| *a != self.target))
            .any(|n| n.style().is_some_and(|s| s.position.is_out_of_flow()))
    }

    fn elements_above(&self) -> Vec<N> {
        let Some(root) = self.target.document_element() else {
            return Vec::new();
        };
        let target_order = self.target.paint_order();
        let reach: Vec<Rect> = self.fragments.iter().map(|f| f.inflate(OVERLAP_TOLERANCE)).collect();
        let mut above: Vec<(PaintOrder, N)> = std::iter::once(root)
            .chain(root.descendants())
            .filter(|n| n.is_element() && n.style().is_some())
            .filter(|n| n.border_box().is_some_and(|b| !b.is_empty() && intersects_fragments(&b, &reach)))
            .filter(|n| !self.is_in_target_flow(*n))
            .map(|n| (n.paint_order(), n))
            .filter(|(order, n)| *order > target_order && is_visible(*n))
            .collect();
        above.sort_by(|a, b| b.0.cmp(&a.0));
        above.into_iter().map(|(_, n)| n).collect()
    }

    /// Topmost element hiding the target's text at `point`
    ///
    /// Only elements that reach the text are considered, so `point` is
    /// expected on or near a fragment.
    pub fn occluder_at(&self, point: (f64, f64)) -> Option<N> {
        self.above
            .iter()
            .copied()
            .filter(|n| !is_fixed(*n) && is_opaque_cover(*n))
            .find(|n| covers(*n, point))
    }

    /// First element hiding any sampled point of the target's text
    pub fn find_occluder(&self) -> Option<N> {
        for point in sample_points(&self.fragments) {
            if let Some(hit) = self.occluder_at(point) {
                tracing::debug!(target_node = %self.target.label(), occluder = %hit.label(), ?point, "text occluded");
                return Some(hit);
            }
        }
        None
    }

    /// Fixed-position elements painted over the target's text, topmost first
    pub fn fixed_overlays(&self) -> Vec<N> {
        self.above
            .iter()
            .copied()
            .filter(|n| is_fixed(*n) && n.border_box().is_some_and(|b| self.overlaps(&b)))
            .collect()
    }

    /// Everything painted over the text that tints it, topmost first
    ///
    /// Fixed overlays, plus in-page elements with a visible background
    /// covering at least one sampled point.
    pub fn overlays(&self) -> Vec<N> {
        let points = sample_points(&self.fragments);
        self.above
            .iter()
            .copied()
            .filter(|n| {
                if is_fixed(*n) {
                    n.border_box().is_some_and(|b| self.overlaps(&b))
                } else {
                    n.style().is_some_and(|s| !s.background_color.is_transparent() || s.has_background_image())
                        && points.iter().any(|p| covers(*n, *p))
                }
            })
            .collect()
    }
}

fn is_fixed<N: VirtualNode>(node: N) -> bool {
    node.style().is_some_and(|s| s.position == Position::Fixed)
}

fn covers<N: VirtualNode>(node: N, (x, y): (f64, f64)) -> bool {
    node.border_box()
        .is_some_and(|b| b.inflate(OVERLAP_TOLERANCE).contains_point(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_points_per_fragment() {
        let fragments = [Rect::from_xywh(0.0, 0.0, 100.0, 20.0), Rect::from_xywh(0.0, 20.0, 40.0, 20.0)];
        let points = sample_points(&fragments);
        assert_eq!(points.len(), 2 * SAMPLES_PER_FRAGMENT);
        assert_eq!(points[0], (1.0, 10.0));
        assert_eq!(points[1], (50.0, 10.0));
        assert_eq!(points[2], (99.0, 10.0));
        assert!(points[3..].iter().all(|&(_, y)| y == 30.0));
    }

    #[test]
    fn test_empty_fragments_are_skipped() {
        assert!(sample_points(&[Rect::from_xywh(5.0, 5.0, 0.0, 10.0)]).is_empty());
    }

    #[test]
    fn test_touching_rects_do_not_overlap_fragments() {
        let fragments = [Rect::from_xywh(0.0, 100.0, 100.0, 20.0)];
        assert!(!intersects_fragments(&Rect::from_xywh(0.0, 0.0, 100.0, 100.0), &fragments));
        assert!(intersects_fragments(&Rect::from_xywh(0.0, 0.0, 100.0, 101.0), &fragments));
    }
}
