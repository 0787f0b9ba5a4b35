//! `text-shadow` values

use crate::color::Color;
use crate::properties::{Keyword, Length, split_top_level};

/// One text-shadow layer with lengths resolved to px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextShadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    /// `None` means `currentcolor`
    pub color: Option<Color>,
}

impl TextShadow {
    /// Parse a comma-separated shadow list; `none` yields no layers
    ///
    /// Returns `None` when any layer is malformed, so the declaration is
    /// ignored as a whole.
    pub fn parse_list(value: &str, font_size: f64, root_font_size: f64) -> Option<Vec<TextShadow>> {
        if Keyword::from_ident(value.trim()) == Some(Keyword::None) {
            return Some(Vec::new());
        }
        split_top_level(value, ',')
            .into_iter()
            .map(|layer| Self::parse_layer(layer, font_size, root_font_size))
            .collect()
    }

    fn parse_layer(layer: &str, font_size: f64, root_font_size: f64) -> Option<TextShadow> {
        let mut lengths = Vec::with_capacity(3);
        let mut color = None;
        for token in split_top_level(layer, ' ') {
            if let Some(len) = Length::parse(token) {
                lengths.push(len.to_px(font_size, root_font_size, 0.0));
            } else if Keyword::from_ident(token) == Some(Keyword::CurrentColor) {
                color = None;
            } else {
                color = Some(Color::parse(token).ok()?);
            }
        }
        let (offset_x, offset_y, blur) = match lengths.as_slice() {
            [x, y] => (*x, *y, 0.0),
            [x, y, b] => (*x, *y, b.max(0.0)),
            _ => return None,
        };
        Some(TextShadow { offset_x, offset_y, blur, color })
    }

    /// Layer color, falling back to the text color
    pub fn resolved_color(&self, current_color: Color) -> Color {
        self.color.unwrap_or(current_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_em_blur_resolves_against_font_size() {
        let layers = TextShadow::parse_list("0 0 .09em #000, 0 0 .09em #000", 20.0, 16.0).unwrap();
        assert_eq!(layers.len(), 2);
        assert!((layers[0].blur - 1.8).abs() < 1e-9);
        assert_eq!(layers[0].color, Some(Color::BLACK));
    }

    #[test]
    fn test_color_first_and_missing_blur() {
        let layers = TextShadow::parse_list("red 1px 2px", 16.0, 16.0).unwrap();
        assert_eq!(layers[0].offset_x, 1.0);
        assert_eq!(layers[0].offset_y, 2.0);
        assert_eq!(layers[0].blur, 0.0);
        assert_eq!(layers[0].color, Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_none_and_invalid() {
        assert_eq!(TextShadow::parse_list("none", 16.0, 16.0), Some(Vec::new()));
        assert_eq!(TextShadow::parse_list("1px", 16.0, 16.0), None);
        assert_eq!(TextShadow::parse_list("1px 1px blurry", 16.0, 16.0), None);
    }

    #[test]
    fn test_current_color_default() {
        let layers = TextShadow::parse_list("1px 1px 2px", 16.0, 16.0).unwrap();
        assert_eq!(layers[0].resolved_color(Color::WHITE), Color::WHITE);
    }
}
