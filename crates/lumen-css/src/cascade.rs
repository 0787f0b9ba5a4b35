//! Style Cascade & Resolver
//!
//! Computes the final styles for document elements by:
//! 1. Inheriting from the parent's computed style
//! 2. Applying user agent defaults for the tag
//! 3. Applying the inline `style` declarations (normal, then `!important`)
//!
//! Pseudo-elements inherit from their owning element.

use std::collections::HashMap;

use lumen_dom::{DomTree, NodeId, PseudoElement};

use crate::Declaration;
use crate::computed::ComputedStyle;
use crate::parser::DeclarationParser;

/// Computed styles for every element of a tree
#[derive(Debug, Default)]
pub struct StyleMap {
    elements: Vec<Option<ComputedStyle>>,
    pseudo: HashMap<(NodeId, PseudoElement), ComputedStyle>,
}

impl StyleMap {
    /// Style of an element; `None` for text and document nodes
    pub fn get(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.elements.get(id.index()).and_then(Option::as_ref)
    }

    /// Style of a pseudo-element that declares `content`
    pub fn pseudo(&self, id: NodeId, pseudo: PseudoElement) -> Option<&ComputedStyle> {
        self.pseudo.get(&(id, pseudo))
    }

    pub fn len(&self) -> usize {
        self.elements.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Style resolver - computes styles for document elements
#[derive(Debug, Default)]
pub struct StyleResolver {
    parser: DeclarationParser,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self { parser: DeclarationParser::new() }
    }

    /// Compute styles for the whole tree in document order
    pub fn compute_all(&self, tree: &DomTree) -> StyleMap {
        let mut map = StyleMap {
            elements: vec![None; tree.len()],
            pseudo: HashMap::new(),
        };
        let root_style = ComputedStyle::default();

        for id in tree.preorder(NodeId::ROOT) {
            let parent_style = tree
                .ancestors(id)
                .find_map(|a| map.elements[a.index()].as_ref())
                .unwrap_or(&root_style);
            let Some(style) = self.compute_style(tree, id, parent_style) else {
                continue;
            };

            for pseudo in [PseudoElement::Before, PseudoElement::After] {
                if let Some(pseudo_style) = self.compute_pseudo(tree, id, pseudo, &style) {
                    map.pseudo.insert((id, pseudo), pseudo_style);
                }
            }
            map.elements[id.index()] = Some(style);
        }

        tracing::debug!(elements = map.len(), pseudo = map.pseudo.len(), "computed styles");
        map
    }

    /// Compute the style of one element given its parent's style
    pub fn compute_style(&self, tree: &DomTree, id: NodeId, parent: &ComputedStyle) -> Option<ComputedStyle> {
        let element = tree.get(id)?.as_element()?;
        let mut style = ComputedStyle::inherit_from(parent);

        let ua = ua_declarations(&element.tag, element.get_attr("href").is_some());
        self.apply_block(&mut style, ua, parent);
        if let Some(inline) = element.inline_style() {
            self.apply_block(&mut style, inline, parent);
        }
        Some(style)
    }

    /// Compute a pseudo-element style; `None` unless it generates content
    pub fn compute_pseudo(
        &self,
        tree: &DomTree,
        id: NodeId,
        pseudo: PseudoElement,
        owner: &ComputedStyle,
    ) -> Option<ComputedStyle> {
        let declarations = tree.get(id)?.as_element()?.pseudo_style(pseudo)?;
        let mut style = ComputedStyle::inherit_from(owner);
        self.apply_block(&mut style, declarations, owner);
        style.content.is_some().then_some(style)
    }

    fn apply_block(&self, style: &mut ComputedStyle, css: &str, parent: &ComputedStyle) {
        if css.trim().is_empty() {
            return;
        }
        let mut decls: Vec<Declaration> = self.parser.parse_lenient(css);
        // Important after normal, and font-size/color ahead of the values that depend on them
        decls.sort_by_key(|d| (d.important, !d.property.is_priority()));
        for decl in &decls {
            style.apply_declaration(decl, parent);
        }
    }
}

/// User agent defaults by tag name
fn ua_declarations(tag: &str, has_href: bool) -> &'static str {
    match tag {
        "html" | "body" | "div" | "p" | "ul" | "ol" | "dl" | "dt" | "dd" | "form" | "header" | "footer"
        | "section" | "article" | "nav" | "aside" | "main" | "blockquote" | "figure" | "figcaption"
        | "fieldset" | "address" | "pre" | "hr" | "details" | "summary" | "legend" | "center" => "display: block",
        "h1" => "display: block; font-size: 2em; font-weight: bold",
        "h2" => "display: block; font-size: 1.5em; font-weight: bold",
        "h3" => "display: block; font-size: 1.17em; font-weight: bold",
        "h4" => "display: block; font-weight: bold",
        "h5" => "display: block; font-size: 0.83em; font-weight: bold",
        "h6" => "display: block; font-size: 0.67em; font-weight: bold",
        "li" => "display: list-item",
        "table" => "display: table",
        "caption" => "display: table-caption",
        "thead" => "display: table-header-group",
        "tbody" => "display: table-row-group",
        "tfoot" => "display: table-footer-group",
        "tr" => "display: table-row",
        "td" => "display: table-cell",
        "th" => "display: table-cell; font-weight: bold",
        "head" | "script" | "style" | "link" | "meta" | "title" | "template" => "display: none",
        "b" | "strong" => "font-weight: bolder",
        "i" | "em" | "cite" | "var" | "dfn" => "font-style: italic",
        "u" | "ins" => "text-decoration: underline",
        "small" => "font-size: smaller",
        "big" => "font-size: larger",
        "mark" => "background-color: yellow; color: black",
        "button" | "input" | "select" | "textarea" => "display: inline-block",
        "a" if has_href => "color: #0000ee; text-decoration: underline",
        _ => "",
    }
}
