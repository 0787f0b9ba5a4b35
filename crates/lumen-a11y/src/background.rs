//! Background color resolution
//!
//! Walks the boxes painted behind a node's text, nearest first, and
//! composites their colors over the white canvas. Anything whose color is
//! unknowable (images, gradients, generated content, covering boxes) stops
//! the walk with a reason instead of a guess.

use std::collections::VecDeque;
use std::vec;

use lumen_css::{BackgroundImage, Color, Position};
use lumen_dom::{PseudoElement, Rect};
use lumen_layout::overlap::intersects_fragments;
use lumen_layout::visibility::cumulative_opacity;
use lumen_layout::{OverlapDetector, VirtualNode};

use crate::verdict::MessageKey;

/// Where a paint layer comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// The target or one of its ancestors
    Element,
    /// Generated box of the element
    Pseudo(PseudoElement),
    /// Fixed-position element drawn over the target
    Fixed,
    /// In-page element with a see-through background drawn over the target
    Overlay,
}

/// One background painted behind the text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintLayer<N> {
    pub node: N,
    pub kind: LayerKind,
    /// Background color with alpha already scaled by cumulative opacity
    pub color: Color,
    pub image: BackgroundImage,
}

impl<N: VirtualNode> PaintLayer<N> {
    fn element(node: N, kind: LayerKind) -> Option<Self> {
        let style = node.style()?;
        Some(Self {
            node,
            kind,
            color: style.background_color.fade(cumulative_opacity(node)),
            image: style.background_image,
        })
    }

    /// Absolutely positioned generated box that covers part of `region`
    fn pseudo(owner: N, pseudo: PseudoElement, region: &[Rect]) -> Option<Self> {
        let style = owner.pseudo_style(pseudo)?;
        if style.content.is_none() || style.position != Position::Absolute {
            return None;
        }
        let rect = owner.pseudo_box(pseudo)?;
        if rect.is_empty() || !intersects_fragments(&rect, region) {
            return None;
        }
        Some(Self {
            node: owner,
            kind: LayerKind::Pseudo(pseudo),
            color: style.background_color.fade(cumulative_opacity(owner) * style.opacity),
            image: style.background_image,
        })
    }

    /// Why this layer makes the background unknowable
    fn blocking_reason(&self) -> Option<MessageKey> {
        if let LayerKind::Pseudo(_) = self.kind {
            let paints = !self.image.is_none() || self.color.is_opaque();
            return paints.then_some(MessageKey::PseudoContent);
        }
        match self.image {
            BackgroundImage::None => None,
            BackgroundImage::Url => Some(MessageKey::BgImage),
            BackgroundImage::Gradient => Some(MessageKey::BgGradient),
        }
    }
}

/// Lazy walk over the layers behind a target's text, nearest first
///
/// Order: overlays (topmost first), then for the target and each ancestor
/// its `::after`, its `::before` and its own background.
#[derive(Debug)]
pub struct PaintLayers<N> {
    target: N,
    region: Vec<Rect>,
    overlays: vec::IntoIter<N>,
    next_element: Option<N>,
    queued: VecDeque<PaintLayer<N>>,
}

impl<N: VirtualNode> PaintLayers<N> {
    pub fn new(detector: &OverlapDetector<N>) -> Self {
        let target = detector.target();
        let start = if target.is_element() { Some(target) } else { target.parent() };
        Self {
            target,
            region: detector.fragments().to_vec(),
            overlays: detector.overlays().into_iter(),
            next_element: start,
            queued: VecDeque::new(),
        }
    }

    /// Ancestors away from the text are skipped; table rows and row groups
    /// paint under their cells wherever their box is reported
    fn participates(&self, element: N) -> bool {
        if element == self.target {
            return true;
        }
        if element.style().is_some_and(|s| s.display.is_table_row_or_group())
            || matches!(element.tag_name(), Some("tr" | "thead" | "tbody" | "tfoot"))
        {
            return true;
        }
        element.border_box().is_none_or(|b| intersects_fragments(&b, &self.region))
    }
}

impl<N: VirtualNode> Iterator for PaintLayers<N> {
    type Item = PaintLayer<N>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(layer) = self.queued.pop_front() {
                return Some(layer);
            }
            if let Some(node) = self.overlays.next() {
                let kind = if node.style().is_some_and(|s| s.position == Position::Fixed) {
                    LayerKind::Fixed
                } else {
                    LayerKind::Overlay
                };
                match PaintLayer::element(node, kind) {
                    Some(layer) => return Some(layer),
                    None => continue,
                }
            }

            let element = self.next_element?;
            self.next_element = element.parent();
            if !self.participates(element) {
                tracing::trace!(element = %element.label(), "skipped, away from text");
                continue;
            }
            for pseudo in PseudoElement::PAINT_ORDER_TOP_DOWN {
                if let Some(layer) = PaintLayer::pseudo(element, pseudo, &self.region) {
                    self.queued.push_back(layer);
                }
            }
            if let Some(layer) = PaintLayer::element(element, LayerKind::Element) {
                self.queued.push_back(layer);
            }
        }
    }
}

/// Resolved background of a node's text
#[derive(Debug, Clone, PartialEq)]
pub enum Background<N> {
    Resolved {
        color: Color,
        /// Nodes whose backgrounds showed through, nearest first
        contributors: Vec<N>,
    },
    Indeterminate {
        reason: MessageKey,
        implicated: Vec<N>,
    },
}

impl<N> Background<N> {
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Resolved { color, .. } => Some(*color),
            Self::Indeterminate { .. } => None,
        }
    }

    fn indeterminate(reason: MessageKey, implicated: Vec<N>) -> Self {
        Self::Indeterminate { reason, implicated }
    }
}

/// Effective background color behind `node`'s text
pub fn resolve_background<N: VirtualNode>(node: N) -> Background<N> {
    let detector = match node.style().and_then(|_| OverlapDetector::new(node)) {
        Some(detector) => detector,
        None => {
            tracing::debug!(node = %node.label(), "no layout information");
            return Background::indeterminate(MessageKey::NoLayout, Vec::new());
        }
    };

    if let Some(occluder) = detector.find_occluder() {
        return Background::indeterminate(MessageKey::BgOverlap, vec![occluder]);
    }

    let mut stack: Vec<PaintLayer<N>> = Vec::new();
    for layer in PaintLayers::new(&detector) {
        tracing::trace!(node = %layer.node.label(), kind = ?layer.kind, color = %layer.color, "paint layer");
        if let Some(reason) = layer.blocking_reason() {
            tracing::debug!(node = %node.label(), at = %layer.node.label(), %reason, "background indeterminate");
            return Background::indeterminate(reason, vec![layer.node]);
        }
        let opaque = layer.color.is_opaque();
        stack.push(layer);
        if opaque {
            break;
        }
    }

    let color = stack.iter().rev().fold(Color::WHITE, |below, layer| layer.color.over(below));
    let mut contributors = Vec::new();
    for layer in stack.iter().filter(|l| !l.color.is_transparent()) {
        if !contributors.contains(&layer.node) {
            contributors.push(layer.node);
        }
    }
    tracing::debug!(node = %node.label(), %color, layers = stack.len(), "background resolved");
    Background::Resolved { color, contributors }
}
