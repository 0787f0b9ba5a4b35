//! Lumen CSS - Color math & style system
//!
//! Color parsing and WCAG math, inline declaration parsing, and the computed
//! styles the contrast checks read.

mod cascade;
mod color;
mod computed;
mod parser;
mod properties;
mod shadow;

pub use cascade::{StyleMap, StyleResolver};
pub use color::{Color, contrast_ratio};
pub use computed::{
    BackgroundImage, BorderSide, BorderStyle, ComputedStyle, DEFAULT_FONT_SIZE, Display, FontStyle, Overflow,
    Position, SizeValue, TextDecorationLine, Visibility,
};
pub use parser::DeclarationParser;
pub use properties::{Keyword, Length, LengthUnit, PropertyId, split_top_level};
pub use shadow::TextShadow;

/// Parse a declaration block, dropping what cannot be parsed
pub fn parse_declarations(css: &str) -> Vec<Declaration> {
    DeclarationParser::new().parse_lenient(css)
}

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: PropertyId,
    /// Serialized value text
    pub value: String,
    pub important: bool,
}

/// CSS parsing error
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
