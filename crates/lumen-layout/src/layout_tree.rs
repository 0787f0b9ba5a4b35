//! Layout Tree
//!
//! Geometry the host measured for each node: the border box, the line-box
//! fragments of inline content, and generated-content boxes.

use lumen_css::ComputedStyle;
use lumen_dom::{NodeId, PseudoElement, Rect};

/// Per-node geometry, indexed by `NodeId`
#[derive(Debug, Default, Clone)]
pub struct LayoutTree {
    boxes: Vec<Option<LayoutBox>>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutBox> {
        self.boxes.get(id.index()).and_then(Option::as_ref)
    }

    /// Box for `id`, created empty on first access
    pub fn entry(&mut self, id: NodeId) -> &mut LayoutBox {
        if self.boxes.len() <= id.index() {
            self.boxes.resize(id.index() + 1, None);
        }
        self.boxes[id.index()].get_or_insert_with(LayoutBox::default)
    }

    /// Number of nodes with any geometry
    pub fn len(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A box in the layout tree
#[derive(Debug, Default, Clone)]
pub struct LayoutBox {
    pub border_box: Option<Rect>,
    /// One rect per line box for inline content
    pub fragments: Vec<Rect>,
    before: Option<Rect>,
    after: Option<Rect>,
}

impl LayoutBox {
    pub fn pseudo_box(&self, pseudo: PseudoElement) -> Option<Rect> {
        match pseudo {
            PseudoElement::Before => self.before,
            PseudoElement::After => self.after,
        }
    }

    pub fn set_pseudo_box(&mut self, pseudo: PseudoElement, rect: Rect) {
        match pseudo {
            PseudoElement::Before => self.before = Some(rect),
            PseudoElement::After => self.after = Some(rect),
        }
    }
}

/// Box of an absolutely positioned generated element, derived from its
/// declared offsets and size against the owner's border box
///
/// `auto` sizes are content-sized; generated boxes here only carry
/// `content` strings, so they collapse to zero.
pub fn generated_box(owner: Rect, style: &ComputedStyle) -> Rect {
    let width = style.width.resolve(owner.width).unwrap_or(0.0);
    let height = style.height.resolve(owner.height).unwrap_or(0.0);
    let x = owner.x + style.left.resolve(owner.width).unwrap_or(0.0);
    let y = owner.y + style.top.resolve(owner.height).unwrap_or(0.0);
    Rect::from_xywh(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_css::SizeValue;

    #[test]
    fn test_entry_grows_arena() {
        let mut layout = LayoutTree::new();
        assert!(layout.is_empty());
        let id = lumen_dom::DomTree::new().create_element("div");
        layout.entry(id).border_box = Some(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(layout.len(), 1);
        assert!(layout.get(id).unwrap().border_box.is_some());
    }

    #[test]
    fn test_generated_box_percentages() {
        let mut style = ComputedStyle::default();
        style.width = SizeValue::Percent(100.0);
        style.height = SizeValue::Percent(50.0);
        style.left = SizeValue::Px(5.0);
        let owner = Rect::from_xywh(10.0, 20.0, 200.0, 40.0);
        assert_eq!(generated_box(owner, &style), Rect::from_xywh(15.0, 20.0, 200.0, 20.0));
    }

    #[test]
    fn test_generated_box_auto_collapses() {
        let owner = Rect::from_xywh(0.0, 0.0, 200.0, 40.0);
        assert!(generated_box(owner, &ComputedStyle::default()).is_empty());
    }
}
