//! DOM Node
//!
//! Nodes link to each other by `NodeId` rather than pointers, so a whole
//! tree is one `Vec` and handles stay `Copy`.

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Generated-content boxes attached to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoElement {
    Before,
    After,
}

impl PseudoElement {
    /// Both pseudo-elements, topmost painted first
    pub const PAINT_ORDER_TOP_DOWN: [PseudoElement; 2] = [PseudoElement::After, PseudoElement::Before];

    pub fn as_str(self) -> &'static str {
        match self {
            PseudoElement::Before => "::before",
            PseudoElement::After => "::after",
        }
    }
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in source order
    pub attrs: Vec<Attribute>,
    /// Declarations for `::before` / `::after`, when the host supplies them
    pseudo_styles: [Option<String>; 2],
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            pseudo_styles: [None, None],
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute {
            name: name.to_ascii_lowercase(),
            value,
        });
    }

    /// Inline `style` attribute
    pub fn inline_style(&self) -> Option<&str> {
        self.get_attr("style")
    }

    /// `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn pseudo_style(&self, pseudo: PseudoElement) -> Option<&str> {
        self.pseudo_styles[pseudo_slot(pseudo)].as_deref()
    }

    pub fn set_pseudo_style(&mut self, pseudo: PseudoElement, declarations: impl Into<String>) {
        self.pseudo_styles[pseudo_slot(pseudo)] = Some(declarations.into());
    }
}

fn pseudo_slot(pseudo: PseudoElement) -> usize {
    match pseudo {
        PseudoElement::Before => 0,
        PseudoElement::After => 1,
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_lowercased() {
        let node = Node::element("DIV");
        assert_eq!(node.as_element().unwrap().tag, "div");
    }

    #[test]
    fn test_attr_overwrite() {
        let mut el = ElementData::new("a");
        el.set_attr("href", "/one");
        el.set_attr("HREF", "/two");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.get_attr("href"), Some("/two"));
    }

    #[test]
    fn test_pseudo_styles_are_independent() {
        let mut el = ElementData::new("div");
        el.set_pseudo_style(PseudoElement::Before, "content: ''");
        assert_eq!(el.pseudo_style(PseudoElement::Before), Some("content: ''"));
        assert_eq!(el.pseudo_style(PseudoElement::After), None);
    }
}
