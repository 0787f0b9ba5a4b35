//! Rendered documents
//!
//! A [`RenderedDocument`] bundles the node tree, computed styles and the
//! host-measured geometry. [`LiveNode`] is its [`VirtualNode`] handle.

use std::fmt;

use lumen_css::{ComputedStyle, StyleMap, StyleResolver};
use lumen_dom::{DomTree, NodeId, PseudoElement, Rect};

use crate::layout_tree::{LayoutTree, generated_box};
use crate::stacking::PaintOrder;
use crate::{LayoutError, Provenance, VirtualNode};

/// Description of an element to append
#[derive(Debug, Default, Clone)]
pub struct ElementSpec {
    tag: String,
    attrs: Vec<(String, String)>,
    pseudo: Vec<(PseudoElement, String)>,
    border_box: Option<Rect>,
    fragments: Vec<Rect>,
    pseudo_boxes: Vec<(PseudoElement, Rect)>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Self::default() }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Inline `style` declarations
    pub fn style(self, css: &str) -> Self {
        self.attr("style", css)
    }

    /// Declarations of a `::before` / `::after` box
    pub fn pseudo(mut self, pseudo: PseudoElement, css: &str) -> Self {
        self.pseudo.push((pseudo, css.to_string()));
        self
    }

    pub fn bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.border_box = Some(Rect::from_xywh(x, y, width, height));
        self
    }

    /// Line-box rects for inline content
    pub fn fragments(mut self, rects: impl IntoIterator<Item = Rect>) -> Self {
        self.fragments.extend(rects);
        self
    }

    pub fn pseudo_bounds(mut self, pseudo: PseudoElement, rect: Rect) -> Self {
        self.pseudo_boxes.push((pseudo, rect));
        self
    }
}

/// Builds a [`RenderedDocument`] starting from `<html><body>`
#[derive(Debug)]
pub struct DocumentBuilder {
    tree: DomTree,
    layout: LayoutTree,
    html: NodeId,
    body: NodeId,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        // Fresh arena: both ids exist and the document node is a container
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, body);
        Self { tree, layout: LayoutTree::new(), html, body }
    }

    pub fn html(&self) -> NodeId {
        self.html
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Style the `<html>` element
    pub fn html_style(&mut self, css: &str) -> &mut Self {
        self.set_attr(self.html, "style", css);
        self
    }

    /// Style the `<body>` element
    pub fn body_style(&mut self, css: &str) -> &mut Self {
        self.set_attr(self.body, "style", css);
        self
    }

    fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.tree.get_mut(id).and_then(|n| n.as_element_mut()) {
            el.set_attr(name, value);
        }
    }

    /// Append an element under `parent`
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> Result<NodeId, LayoutError> {
        let id = self.tree.create_element(&spec.tag);
        self.tree.append_child(parent, id)?;

        let el = self
            .tree
            .get_mut(id)
            .and_then(|n| n.as_element_mut())
            .ok_or(LayoutError::UnknownNode(id))?;
        for (name, value) in spec.attrs {
            el.set_attr(&name, value);
        }
        for (pseudo, css) in spec.pseudo {
            el.set_pseudo_style(pseudo, css);
        }

        let layout_box = self.layout.entry(id);
        layout_box.border_box = spec.border_box;
        layout_box.fragments = spec.fragments;
        for (pseudo, rect) in spec.pseudo_boxes {
            layout_box.set_pseudo_box(pseudo, rect);
        }
        Ok(id)
    }

    /// Append a text node under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, LayoutError> {
        let id = self.tree.create_text(text);
        self.tree.append_child(parent, id)?;
        Ok(id)
    }

    /// Set or replace a node's border box
    pub fn set_bounds(&mut self, id: NodeId, rect: Rect) -> Result<(), LayoutError> {
        self.tree.get(id).ok_or(LayoutError::UnknownNode(id))?;
        self.layout.entry(id).border_box = Some(rect);
        Ok(())
    }

    /// Compute styles and freeze the document
    pub fn build(self) -> RenderedDocument {
        RenderedDocument::new(self.tree, self.layout)
    }
}

/// Tree + computed styles + geometry
#[derive(Debug)]
pub struct RenderedDocument {
    tree: DomTree,
    styles: StyleMap,
    layout: LayoutTree,
    order: Vec<usize>,
    /// Paint order per node, indexed like `order`
    paint: Vec<PaintOrder>,
}

impl RenderedDocument {
    pub fn new(tree: DomTree, layout: LayoutTree) -> Self {
        let styles = StyleResolver::new().compute_all(&tree);
        let preorder = tree.preorder(NodeId::ROOT);
        let mut order = vec![usize::MAX; tree.len()];
        for (position, id) in preorder.iter().enumerate() {
            order[id.index()] = position;
        }
        let mut doc = Self { tree, styles, layout, order, paint: Vec::new() };

        let mut paint = vec![PaintOrder::default(); doc.tree.len()];
        for &id in preorder.iter().filter(|&&id| id != NodeId::ROOT) {
            paint[id.index()] = PaintOrder::of(LiveNode { doc: &doc, id });
        }
        doc.paint = paint;

        tracing::debug!(nodes = doc.tree.len(), boxes = doc.layout.len(), "rendered document ready");
        doc
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> Option<LiveNode<'_>> {
        self.tree.get(id)?;
        (id != NodeId::ROOT).then_some(LiveNode { doc: self, id })
    }

    /// Element with the given `id` attribute
    pub fn element_by_id(&self, id: &str) -> Option<LiveNode<'_>> {
        self.tree.element_by_id(id).map(|id| LiveNode { doc: self, id })
    }

    pub fn root(&self) -> Option<LiveNode<'_>> {
        self.tree.document_element().map(|id| LiveNode { doc: self, id })
    }
}

/// Node of a rendered document
#[derive(Clone, Copy)]
pub struct LiveNode<'a> {
    doc: &'a RenderedDocument,
    id: NodeId,
}

impl PartialEq for LiveNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl fmt::Debug for LiveNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiveNode({}, {:?})", self.label(), self.id)
    }
}

impl VirtualNode for LiveNode<'_> {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn provenance(&self) -> Provenance {
        Provenance::Live
    }

    fn parent(&self) -> Option<Self> {
        self.doc
            .tree
            .parent(self.id)
            .filter(|&p| p != NodeId::ROOT)
            .map(|id| Self { doc: self.doc, id })
    }

    fn children(&self) -> Vec<Self> {
        self.doc.tree.children(self.id).map(|id| Self { doc: self.doc, id }).collect()
    }

    fn is_element(&self) -> bool {
        self.doc.tree.get(self.id).is_some_and(|n| n.is_element())
    }

    fn is_document_element(&self) -> bool {
        self.doc.tree.document_element() == Some(self.id)
    }

    fn tag_name(&self) -> Option<&str> {
        self.doc.tree.tag_name(self.id)
    }

    fn text(&self) -> Option<&str> {
        self.doc.tree.get(self.id)?.as_text()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.doc.tree.get(self.id)?.as_element()?.get_attr(name)
    }

    fn style(&self) -> Option<&ComputedStyle> {
        self.doc.styles.get(self.id)
    }

    fn pseudo_style(&self, pseudo: PseudoElement) -> Option<&ComputedStyle> {
        self.doc.styles.pseudo(self.id, pseudo)
    }

    fn border_box(&self) -> Option<Rect> {
        self.doc.layout.get(self.id)?.border_box
    }

    fn line_fragments(&self) -> Option<&[Rect]> {
        let fragments = &self.doc.layout.get(self.id)?.fragments;
        (!fragments.is_empty()).then_some(fragments.as_slice())
    }

    fn pseudo_box(&self, pseudo: PseudoElement) -> Option<Rect> {
        if let Some(rect) = self.doc.layout.get(self.id).and_then(|b| b.pseudo_box(pseudo)) {
            return Some(rect);
        }
        let style = self.pseudo_style(pseudo)?;
        Some(generated_box(self.border_box()?, style))
    }

    fn document_order(&self) -> usize {
        self.doc.order.get(self.id.index()).copied().unwrap_or(usize::MAX)
    }

    fn document_element(&self) -> Option<Self> {
        self.doc.root()
    }

    fn paint_order(&self) -> PaintOrder {
        match self.doc.paint.get(self.id.index()) {
            Some(order) if order.depth() > 0 => order.clone(),
            _ => PaintOrder::of(*self),
        }
    }
}
