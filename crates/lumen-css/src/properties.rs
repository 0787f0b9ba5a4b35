//! CSS Property Definitions
//!
//! The properties that affect painted text and backgrounds, and their
//! value types. Uses enums for fixed values to save memory vs strings.

/// Property identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    // Display & Layout
    Display,
    Position,
    Width,
    Height,
    Top,
    Left,

    // Visual
    Visibility,
    Overflow,
    OverflowX,
    OverflowY,
    Opacity,
    ZIndex,

    // Colors & Background
    Color,
    Background,
    BackgroundColor,
    BackgroundImage,

    // Text
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    TextDecoration,
    TextDecorationLine,
    TextShadow,

    // Borders
    Border,
    BorderTop,
    BorderBottom,
    BorderTopStyle,
    BorderTopWidth,
    BorderTopColor,
    BorderBottomStyle,
    BorderBottomWidth,
    BorderBottomColor,
    Outline,
    OutlineStyle,
    OutlineWidth,
    OutlineColor,

    // Generated content
    Content,
}

impl PropertyId {
    /// Parse a property name into a PropertyId
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "display" => Self::Display,
            "position" => Self::Position,
            "width" => Self::Width,
            "height" => Self::Height,
            "top" => Self::Top,
            "left" => Self::Left,

            "visibility" => Self::Visibility,
            "overflow" => Self::Overflow,
            "overflow-x" => Self::OverflowX,
            "overflow-y" => Self::OverflowY,
            "opacity" => Self::Opacity,
            "z-index" => Self::ZIndex,

            "color" => Self::Color,
            "background" => Self::Background,
            "background-color" => Self::BackgroundColor,
            "background-image" => Self::BackgroundImage,

            "font-family" => Self::FontFamily,
            "font-size" => Self::FontSize,
            "font-weight" => Self::FontWeight,
            "font-style" => Self::FontStyle,
            "text-decoration" => Self::TextDecoration,
            "text-decoration-line" => Self::TextDecorationLine,
            "text-shadow" => Self::TextShadow,

            "border" => Self::Border,
            "border-top" => Self::BorderTop,
            "border-bottom" => Self::BorderBottom,
            "border-top-style" => Self::BorderTopStyle,
            "border-top-width" => Self::BorderTopWidth,
            "border-top-color" => Self::BorderTopColor,
            "border-bottom-style" => Self::BorderBottomStyle,
            "border-bottom-width" => Self::BorderBottomWidth,
            "border-bottom-color" => Self::BorderBottomColor,
            "outline" => Self::Outline,
            "outline-style" => Self::OutlineStyle,
            "outline-width" => Self::OutlineWidth,
            "outline-color" => Self::OutlineColor,

            "content" => Self::Content,

            _ => return None,
        })
    }

    /// Properties other values depend on (`em`, `currentcolor`)
    pub fn is_priority(self) -> bool {
        matches!(self, Self::Color | Self::FontSize)
    }
}

/// CSS keyword values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Global keywords
    Inherit,
    Initial,
    Unset,

    // Common values
    None,
    Auto,
    Normal,
    Hidden,
    Visible,

    // Position
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,

    // Text
    Underline,
    Overline,
    LineThrough,

    // Border style
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,

    // Overflow
    Scroll,
    Clip,
    Collapse,

    // Font
    Bold,
    Bolder,
    Lighter,
    Italic,
    Oblique,

    CurrentColor,
}

impl Keyword {
    pub fn from_ident(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "inherit" => Self::Inherit,
            "initial" => Self::Initial,
            "unset" => Self::Unset,
            "none" => Self::None,
            "auto" => Self::Auto,
            "normal" => Self::Normal,
            "hidden" => Self::Hidden,
            "visible" => Self::Visible,
            "static" => Self::Static,
            "relative" => Self::Relative,
            "absolute" => Self::Absolute,
            "fixed" => Self::Fixed,
            "sticky" | "-webkit-sticky" => Self::Sticky,
            "underline" => Self::Underline,
            "overline" => Self::Overline,
            "line-through" => Self::LineThrough,
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            "double" => Self::Double,
            "groove" => Self::Groove,
            "ridge" => Self::Ridge,
            "inset" => Self::Inset,
            "outset" => Self::Outset,
            "scroll" => Self::Scroll,
            "clip" => Self::Clip,
            "collapse" => Self::Collapse,
            "bold" => Self::Bold,
            "bolder" => Self::Bolder,
            "lighter" => Self::Lighter,
            "italic" => Self::Italic,
            "oblique" => Self::Oblique,
            "currentcolor" => Self::CurrentColor,
            _ => return None,
        })
    }

    /// `inherit`, `initial` and `unset`
    pub fn is_global(self) -> bool {
        matches!(self, Self::Inherit | Self::Initial | Self::Unset)
    }
}

/// CSS length value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

/// Length units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Pt,
    Pc,
    In,
    Cm,
    Mm,
    Em,
    Rem,
    Ex,
    Ch,
    Percent,
}

impl Length {
    pub fn px(value: f64) -> Self {
        Self { value, unit: LengthUnit::Px }
    }

    pub fn zero() -> Self {
        Self::px(0.0)
    }

    /// Parse `12px`, `14pt`, `.09em`, `100%`, or a bare `0`
    pub fn parse(text: &str) -> Option<Length> {
        let text = text.trim().to_ascii_lowercase();
        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e'))
            .unwrap_or(text.len());
        // "e" is only an exponent when a digit follows it, otherwise it starts `em`/`ex`
        let split = match text[..split].rfind('e') {
            Some(pos) if !text[pos + 1..].starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') => pos,
            _ => split,
        };
        let (number, unit) = text.split_at(split);
        let value: f64 = number.parse().ok()?;
        let unit = match unit {
            "" if value == 0.0 => LengthUnit::Px,
            "px" => LengthUnit::Px,
            "pt" => LengthUnit::Pt,
            "pc" => LengthUnit::Pc,
            "in" => LengthUnit::In,
            "cm" => LengthUnit::Cm,
            "mm" => LengthUnit::Mm,
            "em" => LengthUnit::Em,
            "rem" => LengthUnit::Rem,
            "ex" => LengthUnit::Ex,
            "ch" => LengthUnit::Ch,
            "%" => LengthUnit::Percent,
            _ => return None,
        };
        Some(Length { value, unit })
    }

    /// Resolve to CSS pixels
    ///
    /// `font_size` backs `em`/`ex`/`ch`, `percent_base` backs `%`.
    pub fn to_px(&self, font_size: f64, root_font_size: f64, percent_base: f64) -> f64 {
        let v = self.value;
        match self.unit {
            LengthUnit::Px => v,
            LengthUnit::Pt => v * 96.0 / 72.0,
            LengthUnit::Pc => v * 16.0,
            LengthUnit::In => v * 96.0,
            LengthUnit::Cm => v * 96.0 / 2.54,
            LengthUnit::Mm => v * 96.0 / 25.4,
            LengthUnit::Em => v * font_size,
            LengthUnit::Rem => v * root_font_size,
            LengthUnit::Ex | LengthUnit::Ch => v * font_size / 2.0,
            LengthUnit::Percent => v * percent_base / 100.0,
        }
    }
}

/// Split on `separator` outside parentheses and quotes
///
/// Whitespace separators collapse, so `"a  b"` yields two parts.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 && (c == separator || (separator == ' ' && c.is_whitespace())) => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts.into_iter().map(str::trim).filter(|p| !p.is_empty()).collect()
}
