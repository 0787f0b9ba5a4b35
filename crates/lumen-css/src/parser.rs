//! Declaration parsing using lightningcss
//!
//! Parses `style` attribute bodies (and host-supplied pseudo-element
//! declarations) into our internal representation.

use lightningcss::properties::Property;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleAttribute};

use crate::properties::PropertyId;
use crate::{CssError, Declaration};

/// Declaration block parser
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationParser;

impl DeclarationParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a declaration block such as `color: red; font-size: 14pt`
    ///
    /// Invalid declarations are dropped; unknown properties are skipped.
    pub fn parse(&self, css: &str) -> Result<Vec<Declaration>, CssError> {
        let options = ParserOptions {
            error_recovery: true,
            ..ParserOptions::default()
        };

        let attr = StyleAttribute::parse(css, options).map_err(|e| CssError::ParseError {
            line: e.loc.as_ref().map(|l| l.line).unwrap_or(0),
            message: e.to_string(),
        })?;

        let block = &attr.declarations;
        let mut result = Vec::with_capacity(block.declarations.len() + block.important_declarations.len());

        for decl in block.declarations.iter() {
            if let Some(converted) = self.convert_declaration(decl, false) {
                result.push(converted);
            }
        }

        for decl in block.important_declarations.iter() {
            if let Some(converted) = self.convert_declaration(decl, true) {
                result.push(converted);
            }
        }

        Ok(result)
    }

    /// Like [`parse`](Self::parse), logging and discarding a block that fails outright
    pub fn parse_lenient(&self, css: &str) -> Vec<Declaration> {
        self.parse(css).unwrap_or_else(|err| {
            tracing::warn!(%err, css, "dropping unparsable declaration block");
            Vec::new()
        })
    }

    fn convert_declaration(&self, decl: &Property<'_>, important: bool) -> Option<Declaration> {
        let id = decl.property_id();
        let name = id.name();
        let property = PropertyId::from_name(name)?;

        match decl.value_to_css_string(PrinterOptions::default()) {
            Ok(value) => Some(Declaration { property, value, important }),
            Err(err) => {
                tracing::warn!(property = name, %err, "cannot serialize declaration value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(decls: &'a [Declaration], id: PropertyId) -> Option<&'a Declaration> {
        decls.iter().find(|d| d.property == id)
    }

    #[test]
    fn test_parse_basic_block() {
        let decls = DeclarationParser::new().parse("color: black; font-size: 14pt").unwrap();
        assert!(find(&decls, PropertyId::Color).is_some());
        assert_eq!(find(&decls, PropertyId::FontSize).unwrap().value, "14pt");
    }

    #[test]
    fn test_important_flag() {
        let decls = DeclarationParser::new().parse("opacity: 0 !important").unwrap();
        let opacity = find(&decls, PropertyId::Opacity).unwrap();
        assert!(opacity.important);
    }

    #[test]
    fn test_unknown_properties_skipped() {
        let decls = DeclarationParser::new().parse("cursor: pointer; position: absolute").unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].property, PropertyId::Position);
        assert_eq!(decls[0].value, "absolute");
    }

    #[test]
    fn test_lenient_never_fails() {
        let decls = DeclarationParser::new().parse_lenient("");
        assert!(decls.is_empty());
    }
}
