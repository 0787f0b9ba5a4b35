//! Computed Styles
//!
//! The final computed style values for an element after cascade.

use crate::Declaration;
use crate::color::Color;
use crate::properties::{Keyword, Length, PropertyId, split_top_level};
use crate::shadow::TextShadow;

pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Computed style for an element or pseudo-element
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    // Display & Layout
    pub display: Display,
    pub position: Position,
    pub width: SizeValue,
    pub height: SizeValue,
    pub top: SizeValue,
    pub left: SizeValue,

    // Visibility
    pub visibility: Visibility,
    pub overflow: Overflow,
    pub opacity: f64,
    pub z_index: Option<i32>,

    // Colors
    pub color: Color,
    pub background_color: Color,
    pub background_image: BackgroundImage,

    // Text
    pub font_family: Vec<String>,
    pub font_size: f64,
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub text_decoration: TextDecorationLine,
    pub text_shadow: Vec<TextShadow>,

    // Borders used to tell links apart from surrounding text
    pub border_top: BorderSide,
    pub border_bottom: BorderSide,
    pub outline: BorderSide,

    /// `content` of a pseudo-element; `None` for `none`/`normal`
    pub content: Option<String>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Inline,
            position: Position::Static,
            width: SizeValue::Auto,
            height: SizeValue::Auto,
            top: SizeValue::Auto,
            left: SizeValue::Auto,
            visibility: Visibility::Visible,
            overflow: Overflow::Visible,
            opacity: 1.0,
            z_index: None,
            color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            background_image: BackgroundImage::None,
            font_family: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: 400,
            font_style: FontStyle::Normal,
            text_decoration: TextDecorationLine::default(),
            text_shadow: Vec::new(),
            border_top: BorderSide::default(),
            border_bottom: BorderSide::default(),
            outline: BorderSide::default(),
            content: None,
        }
    }
}

/// Display type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    None,
    Block,
    #[default]
    Inline,
    InlineBlock,
    ListItem,
    Flex,
    InlineFlex,
    Grid,
    InlineGrid,
    FlowRoot,
    Contents,
    Table,
    InlineTable,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableRow,
    TableCell,
    TableCaption,
    TableColumn,
}

impl Display {
    fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "none" => Self::None,
            "block" | "block flow" => Self::Block,
            "inline" | "inline flow" => Self::Inline,
            "inline-block" | "inline flow-root" => Self::InlineBlock,
            "list-item" | "block flow list-item" => Self::ListItem,
            "flex" | "block flex" => Self::Flex,
            "inline-flex" | "inline flex" => Self::InlineFlex,
            "grid" | "block grid" => Self::Grid,
            "inline-grid" | "inline grid" => Self::InlineGrid,
            "flow-root" | "block flow-root" => Self::FlowRoot,
            "contents" => Self::Contents,
            "table" | "block table" => Self::Table,
            "inline-table" | "inline table" => Self::InlineTable,
            "table-row-group" => Self::TableRowGroup,
            "table-header-group" => Self::TableHeaderGroup,
            "table-footer-group" => Self::TableFooterGroup,
            "table-row" => Self::TableRow,
            "table-cell" => Self::TableCell,
            "table-caption" => Self::TableCaption,
            "table-column" | "table-column-group" => Self::TableColumn,
            _ => return None,
        })
    }

    /// Participates in inline formatting (contributes line boxes)
    pub fn is_inline_level(self) -> bool {
        matches!(self, Self::Inline | Self::Contents)
    }

    /// Rows and row groups paint their background under the cells they hold
    pub fn is_table_row_or_group(self) -> bool {
        matches!(
            self,
            Self::TableRow | Self::TableRowGroup | Self::TableHeaderGroup | Self::TableFooterGroup
        )
    }

    pub fn is_table_part(self) -> bool {
        self.is_table_row_or_group()
            || matches!(self, Self::TableCell | Self::TableCaption | Self::TableColumn)
    }

    /// Starts its own block of text (a link inside it reads as a separate run)
    pub fn is_block_like(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::ListItem
                | Self::Table
                | Self::Flex
                | Self::Grid
                | Self::InlineBlock
                | Self::FlowRoot
        ) || self.is_table_part()
    }
}

/// Position type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    /// Anything but `static` creates a positioned box
    pub fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }

    /// Taken out of normal flow
    pub fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// Visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

/// Overflow (either axis clipping makes the box a clip container)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
    Clip,
}

impl Overflow {
    fn parse(value: &str) -> Option<Self> {
        Some(match Keyword::from_ident(value)? {
            Keyword::Visible => Self::Visible,
            Keyword::Hidden => Self::Hidden,
            Keyword::Scroll => Self::Scroll,
            Keyword::Auto => Self::Auto,
            Keyword::Clip => Self::Clip,
            _ => return None,
        })
    }

    pub fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Background image layers, reduced to what matters for color resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundImage {
    #[default]
    None,
    /// At least one `url(...)` layer and no gradient
    Url,
    /// At least one `*-gradient(...)` layer
    Gradient,
}

impl BackgroundImage {
    /// Classify a `background-image` value or a `background` shorthand
    pub fn detect(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.contains("gradient(") {
            Self::Gradient
        } else if lower.contains("url(") || lower.contains("image(") || lower.contains("image-set(") {
            Self::Url
        } else {
            Self::None
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// `text-decoration-line` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextDecorationLine {
    pub underline: bool,
    pub overline: bool,
    pub line_through: bool,
}

impl TextDecorationLine {
    fn parse(value: &str) -> Self {
        let mut line = Self::default();
        for token in split_top_level(value, ' ') {
            match Keyword::from_ident(token) {
                Some(Keyword::Underline) => line.underline = true,
                Some(Keyword::Overline) => line.overline = true,
                Some(Keyword::LineThrough) => line.line_through = true,
                _ => {}
            }
        }
        line
    }

    pub fn is_none(&self) -> bool {
        *self == Self::default()
    }
}

/// Border / outline line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    Hidden,
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    fn from_keyword(kw: Keyword) -> Option<Self> {
        Some(match kw {
            Keyword::None => Self::None,
            Keyword::Hidden => Self::Hidden,
            Keyword::Solid => Self::Solid,
            Keyword::Dashed => Self::Dashed,
            Keyword::Dotted => Self::Dotted,
            Keyword::Double => Self::Double,
            Keyword::Groove => Self::Groove,
            Keyword::Ridge => Self::Ridge,
            Keyword::Inset => Self::Inset,
            Keyword::Outset => Self::Outset,
            _ => return None,
        })
    }
}

/// One border edge or the outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSide {
    pub style: BorderStyle,
    pub width: f64,
    /// `None` means `currentcolor`
    pub color: Option<Color>,
}

impl Default for BorderSide {
    fn default() -> Self {
        Self { style: BorderStyle::None, width: 3.0, color: None }
    }
}

impl BorderSide {
    /// Drawn with a non-zero width and a non-transparent color
    pub fn is_painted(&self, current_color: Color) -> bool {
        !matches!(self.style, BorderStyle::None | BorderStyle::Hidden)
            && self.width > 0.0
            && !self.color.unwrap_or(current_color).is_transparent()
    }

    fn apply_shorthand(&mut self, value: &str, font_size: f64) {
        *self = BorderSide::default();
        for token in split_top_level(value, ' ') {
            if let Some(width) = border_width(token, font_size) {
                self.width = width;
            } else if let Some(style) = Keyword::from_ident(token).and_then(BorderStyle::from_keyword) {
                self.style = style;
            } else if let Some(color) = color_value(token) {
                self.color = color;
            }
        }
    }
}

fn border_width(token: &str, font_size: f64) -> Option<f64> {
    match token.to_ascii_lowercase().as_str() {
        "thin" => Some(1.0),
        "medium" => Some(3.0),
        "thick" => Some(5.0),
        other => Length::parse(other).map(|l| l.to_px(font_size, DEFAULT_FONT_SIZE, 0.0)),
    }
}

/// `Some(None)` is `currentcolor`
fn color_value(token: &str) -> Option<Option<Color>> {
    if Keyword::from_ident(token) == Some(Keyword::CurrentColor) {
        return Some(None);
    }
    Color::parse(token).ok().map(Some)
}

/// Width / height / offset value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeValue {
    #[default]
    Auto,
    Px(f64),
    Percent(f64),
}

impl SizeValue {
    fn parse(value: &str, font_size: f64) -> Option<Self> {
        if Keyword::from_ident(value) == Some(Keyword::Auto) {
            return Some(Self::Auto);
        }
        let len = Length::parse(value)?;
        Some(match len.unit {
            crate::LengthUnit::Percent => Self::Percent(len.value),
            _ => Self::Px(len.to_px(font_size, DEFAULT_FONT_SIZE, 0.0)),
        })
    }

    /// Resolve against a containing size; `auto` yields `None`
    pub fn resolve(&self, base: f64) -> Option<f64> {
        match *self {
            Self::Auto => None,
            Self::Px(px) => Some(px),
            Self::Percent(p) => Some(base * p / 100.0),
        }
    }
}

impl ComputedStyle {
    /// Start a child style: inherited properties copied, the rest initial
    pub fn inherit_from(parent: &ComputedStyle) -> Self {
        Self {
            color: parent.color,
            font_family: parent.font_family.clone(),
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            font_style: parent.font_style,
            text_shadow: parent.text_shadow.clone(),
            visibility: parent.visibility,
            ..Self::default()
        }
    }

    /// Font weight counts as bold for `threshold` (usually 700)
    pub fn is_bold(&self, threshold: u16) -> bool {
        self.font_weight >= threshold
    }

    pub fn is_hidden(&self) -> bool {
        self.display == Display::None || self.visibility != Visibility::Visible
    }

    /// Paints any background image or gradient
    pub fn has_background_image(&self) -> bool {
        !self.background_image.is_none()
    }

    /// Apply one declaration; `parent` backs `inherit` and relative font values
    pub fn apply_declaration(&mut self, decl: &Declaration, parent: &ComputedStyle) {
        let value = decl.value.trim();
        if let Some(kw) = Keyword::from_ident(value).filter(|k| k.is_global()) {
            self.apply_global(decl.property, kw, parent);
            return;
        }

        match decl.property {
            PropertyId::Display => {
                if let Some(display) = Display::parse(&value.to_ascii_lowercase()) {
                    self.display = display;
                }
            }
            PropertyId::Position => {
                if let Some(kw) = Keyword::from_ident(value) {
                    self.position = match kw {
                        Keyword::Static => Position::Static,
                        Keyword::Relative => Position::Relative,
                        Keyword::Absolute => Position::Absolute,
                        Keyword::Fixed => Position::Fixed,
                        Keyword::Sticky => Position::Sticky,
                        _ => return,
                    };
                }
            }
            PropertyId::Width => self.width = SizeValue::parse(value, self.font_size).unwrap_or(self.width),
            PropertyId::Height => self.height = SizeValue::parse(value, self.font_size).unwrap_or(self.height),
            PropertyId::Top => self.top = SizeValue::parse(value, self.font_size).unwrap_or(self.top),
            PropertyId::Left => self.left = SizeValue::parse(value, self.font_size).unwrap_or(self.left),
            PropertyId::Visibility => {
                self.visibility = match Keyword::from_ident(value) {
                    Some(Keyword::Visible) => Visibility::Visible,
                    Some(Keyword::Hidden) => Visibility::Hidden,
                    Some(Keyword::Collapse) => Visibility::Collapse,
                    _ => return,
                };
            }
            PropertyId::Overflow => {
                // Two-value form: either axis clipping counts
                let axes: Vec<Overflow> = split_top_level(value, ' ').into_iter().filter_map(Overflow::parse).collect();
                if let Some(first) = axes.first() {
                    self.overflow = axes.iter().copied().find(|o| o.clips()).unwrap_or(*first);
                }
            }
            PropertyId::OverflowX | PropertyId::OverflowY => {
                if let Some(o) = Overflow::parse(value).filter(|o| o.clips()) {
                    self.overflow = o;
                }
            }
            PropertyId::Opacity => {
                let parsed = match value.strip_suffix('%') {
                    Some(pct) => pct.trim().parse::<f64>().ok().map(|p| p / 100.0),
                    None => value.parse::<f64>().ok(),
                };
                if let Some(n) = parsed {
                    self.opacity = n.clamp(0.0, 1.0);
                }
            }
            PropertyId::ZIndex => {
                self.z_index = value.parse::<i32>().ok();
            }
            PropertyId::Color => {
                if let Some(c) = color_value(value) {
                    self.color = c.unwrap_or(parent.color);
                }
            }
            PropertyId::BackgroundColor => {
                if let Some(c) = color_value(value) {
                    self.background_color = c.unwrap_or(self.color);
                }
            }
            PropertyId::BackgroundImage => {
                self.background_image = BackgroundImage::detect(value);
            }
            PropertyId::Background => self.apply_background_shorthand(value),
            PropertyId::FontFamily => {
                self.font_family = split_top_level(value, ',')
                    .into_iter()
                    .map(|f| f.trim_matches(|c| c == '"' || c == '\'').to_ascii_lowercase())
                    .collect();
            }
            PropertyId::FontSize => {
                if let Some(px) = font_size_px(value, parent.font_size) {
                    self.font_size = px;
                }
            }
            PropertyId::FontWeight => {
                if let Some(w) = font_weight(value, parent.font_weight) {
                    self.font_weight = w;
                }
            }
            PropertyId::FontStyle => {
                self.font_style = match Keyword::from_ident(split_top_level(value, ' ').first().copied().unwrap_or("")) {
                    Some(Keyword::Normal) => FontStyle::Normal,
                    Some(Keyword::Italic) => FontStyle::Italic,
                    Some(Keyword::Oblique) => FontStyle::Oblique,
                    _ => return,
                };
            }
            PropertyId::TextDecoration | PropertyId::TextDecorationLine => {
                self.text_decoration = TextDecorationLine::parse(value);
            }
            PropertyId::TextShadow => {
                match TextShadow::parse_list(value, self.font_size, DEFAULT_FONT_SIZE) {
                    Some(layers) => self.text_shadow = layers,
                    None => tracing::debug!(value, "ignoring malformed text-shadow"),
                }
            }
            PropertyId::Border => {
                self.border_top.apply_shorthand(value, self.font_size);
                self.border_bottom = self.border_top;
            }
            PropertyId::BorderTop => self.border_top.apply_shorthand(value, self.font_size),
            PropertyId::BorderBottom => self.border_bottom.apply_shorthand(value, self.font_size),
            PropertyId::Outline => self.outline.apply_shorthand(value, self.font_size),
            PropertyId::BorderTopStyle | PropertyId::BorderBottomStyle | PropertyId::OutlineStyle => {
                if let Some(style) = Keyword::from_ident(value).and_then(BorderStyle::from_keyword) {
                    self.side_mut(decl.property).style = style;
                }
            }
            PropertyId::BorderTopWidth | PropertyId::BorderBottomWidth | PropertyId::OutlineWidth => {
                if let Some(width) = border_width(value, self.font_size) {
                    self.side_mut(decl.property).width = width;
                }
            }
            PropertyId::BorderTopColor | PropertyId::BorderBottomColor | PropertyId::OutlineColor => {
                if let Some(color) = color_value(value) {
                    self.side_mut(decl.property).color = color;
                }
            }
            PropertyId::Content => {
                self.content = match Keyword::from_ident(value) {
                    Some(Keyword::None | Keyword::Normal) => None,
                    _ => Some(value.to_string()),
                };
            }
        }
    }

    fn side_mut(&mut self, property: PropertyId) -> &mut BorderSide {
        match property {
            PropertyId::BorderTopStyle | PropertyId::BorderTopWidth | PropertyId::BorderTopColor => &mut self.border_top,
            PropertyId::BorderBottomStyle | PropertyId::BorderBottomWidth | PropertyId::BorderBottomColor => {
                &mut self.border_bottom
            }
            _ => &mut self.outline,
        }
    }

    fn apply_background_shorthand(&mut self, value: &str) {
        // The shorthand resets both longhands
        self.background_color = Color::TRANSPARENT;
        self.background_image = BackgroundImage::detect(value);

        // Only the final layer may carry a color
        let layers = split_top_level(value, ',');
        let Some(last) = layers.last() else { return };
        for token in split_top_level(last, ' ') {
            if token.contains('(') && !is_color_function(token) {
                continue;
            }
            if let Some(c) = color_value(token) {
                self.background_color = c.unwrap_or(self.color);
            }
        }
    }

    fn apply_global(&mut self, property: PropertyId, kw: Keyword, parent: &ComputedStyle) {
        let inherited = matches!(
            property,
            PropertyId::Color
                | PropertyId::FontFamily
                | PropertyId::FontSize
                | PropertyId::FontWeight
                | PropertyId::FontStyle
                | PropertyId::TextShadow
                | PropertyId::Visibility
        );
        let take_parent = kw == Keyword::Inherit || (kw == Keyword::Unset && inherited);
        let source = if take_parent { parent.clone() } else { ComputedStyle::default() };

        match property {
            PropertyId::Display => self.display = source.display,
            PropertyId::Position => self.position = source.position,
            PropertyId::Width => self.width = source.width,
            PropertyId::Height => self.height = source.height,
            PropertyId::Top => self.top = source.top,
            PropertyId::Left => self.left = source.left,
            PropertyId::Visibility => self.visibility = source.visibility,
            PropertyId::Overflow | PropertyId::OverflowX | PropertyId::OverflowY => self.overflow = source.overflow,
            PropertyId::Opacity => self.opacity = source.opacity,
            PropertyId::ZIndex => self.z_index = source.z_index,
            PropertyId::Color => self.color = source.color,
            PropertyId::Background => {
                self.background_color = source.background_color;
                self.background_image = source.background_image;
            }
            PropertyId::BackgroundColor => self.background_color = source.background_color,
            PropertyId::BackgroundImage => self.background_image = source.background_image,
            PropertyId::FontFamily => self.font_family = source.font_family,
            PropertyId::FontSize => self.font_size = source.font_size,
            PropertyId::FontWeight => self.font_weight = source.font_weight,
            PropertyId::FontStyle => self.font_style = source.font_style,
            PropertyId::TextDecoration | PropertyId::TextDecorationLine => self.text_decoration = source.text_decoration,
            PropertyId::TextShadow => self.text_shadow = source.text_shadow,
            PropertyId::Border => {
                self.border_top = source.border_top;
                self.border_bottom = source.border_bottom;
            }
            PropertyId::BorderTop | PropertyId::BorderTopStyle | PropertyId::BorderTopWidth | PropertyId::BorderTopColor => {
                self.border_top = source.border_top;
            }
            PropertyId::BorderBottom
            | PropertyId::BorderBottomStyle
            | PropertyId::BorderBottomWidth
            | PropertyId::BorderBottomColor => self.border_bottom = source.border_bottom,
            PropertyId::Outline | PropertyId::OutlineStyle | PropertyId::OutlineWidth | PropertyId::OutlineColor => {
                self.outline = source.outline;
            }
            PropertyId::Content => self.content = source.content,
        }
    }
}

fn is_color_function(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    ["rgb(", "rgba(", "hsl(", "hsla(", "hwb(", "lab(", "lch(", "oklab(", "oklch(", "color("]
        .iter()
        .any(|f| lower.starts_with(f))
}

/// Resolve a `font-size` value to px
fn font_size_px(value: &str, parent_px: f64) -> Option<f64> {
    let keyword = match value.to_ascii_lowercase().as_str() {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        "xxx-large" => Some(48.0),
        "smaller" => Some(parent_px / 1.2),
        "larger" => Some(parent_px * 1.2),
        _ => None,
    };
    if keyword.is_some() {
        return keyword;
    }
    let len = Length::parse(value)?;
    let px = len.to_px(parent_px, DEFAULT_FONT_SIZE, parent_px);
    (px >= 0.0).then_some(px)
}

/// Resolve a `font-weight` value
///
/// `bolder` steps up to the next bold face (700, then 900) and `lighter`
/// steps down to the regular face (400, then 100).
fn font_weight(value: &str, parent: u16) -> Option<u16> {
    match Keyword::from_ident(value) {
        Some(Keyword::Normal) => Some(400),
        Some(Keyword::Bold) => Some(700),
        Some(Keyword::Bolder) => Some(if parent < 700 { 700 } else { 900 }),
        Some(Keyword::Lighter) => Some(if parent > 400 { 400 } else { 100 }),
        Some(_) => None,
        None => {
            let n: f64 = value.parse().ok()?;
            (1.0..=1000.0).contains(&n).then_some(n.round() as u16)
        }
    }
}
