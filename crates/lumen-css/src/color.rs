//! Color values and WCAG color math
//!
//! Channels are 8-bit, alpha is a real in `[0, 1]`. Every operation returns
//! a new value.

use std::fmt;

use crate::CssError;

/// An sRGB color with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color { red: 0, green: 0, blue: 0, alpha: 0.0 };
    pub const BLACK: Color = Color { red: 0, green: 0, blue: 0, alpha: 1.0 };
    pub const WHITE: Color = Color { red: 255, green: 255, blue: 255, alpha: 1.0 };

    pub fn new(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self { red, green, blue, alpha: alpha.clamp(0.0, 1.0) }
    }

    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Parse any CSS color notation (named, hex, `rgb()`, `hsl()`, ...)
    pub fn parse(text: &str) -> Result<Color, CssError> {
        let parsed = csscolorparser::parse(text.trim())
            .map_err(|e| CssError::InvalidColor(format!("{text}: {e}")))?;
        let [red, green, blue, _] = parsed.to_rgba8();
        Ok(Color::new(red, green, blue, f64::from(parsed.a)))
    }

    /// Parse, mapping unparsable input to transparent
    pub fn parse_or_transparent(text: &str) -> Color {
        Self::parse(text).unwrap_or_else(|err| {
            tracing::debug!(%err, "unparsable color treated as transparent");
            Color::TRANSPARENT
        })
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha: alpha.clamp(0.0, 1.0), ..self }
    }

    /// Multiply alpha by `factor` (opacity, shadow falloff)
    pub fn fade(self, factor: f64) -> Self {
        self.with_alpha(self.alpha * factor)
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Same RGB channels, alpha ignored
    pub fn same_rgb(&self, other: &Color) -> bool {
        self.red == other.red && self.green == other.green && self.blue == other.blue
    }

    /// Source-over compositing of `foreground` onto `background`
    pub fn composite(foreground: Color, background: Color) -> Color {
        let a = foreground.alpha;
        let mix = |f: u8, b: u8| (f64::from(f) * a + f64::from(b) * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
        Color {
            red: mix(foreground.red, background.red),
            green: mix(foreground.green, background.green),
            blue: mix(foreground.blue, background.blue),
            alpha: (a + background.alpha * (1.0 - a)).clamp(0.0, 1.0),
        }
    }

    /// `self` painted over `background`
    pub fn over(self, background: Color) -> Color {
        Color::composite(self, background)
    }

    /// WCAG relative luminance
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
        }
        0.2126 * channel(self.red) + 0.7152 * channel(self.green) + 0.0722 * channel(self.blue)
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            f.write_str(&self.to_hex_string())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.red, self.green, self.blue, self.alpha)
        }
    }
}

/// WCAG contrast ratio, symmetric, in `[1, 21]`
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (l1, l2) = (a.relative_luminance(), b.relative_luminance());
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_on_white() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        let gray = Color::rgb(128, 128, 128);
        assert_eq!(contrast_ratio(gray, Color::WHITE), contrast_ratio(Color::WHITE, gray));
        assert_eq!(contrast_ratio(gray, gray), 1.0);
    }

    #[test]
    fn test_gray_on_white() {
        let ratio = contrast_ratio(Color::rgb(128, 128, 128), Color::WHITE);
        assert!(ratio > 3.9 && ratio < 4.0);
    }

    #[test]
    fn test_opaque_composite_is_noop() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.over(Color::rgb(0, 0, 255)), red);
    }

    #[test]
    fn test_half_alpha_composite() {
        let out = Color::new(0, 0, 0, 0.5).over(Color::WHITE);
        assert_eq!((out.red, out.green, out.blue), (128, 128, 128));
        assert!(out.is_opaque());
    }

    #[test]
    fn test_transparent_over_transparent() {
        let out = Color::TRANSPARENT.over(Color::TRANSPARENT);
        assert!(out.is_transparent());
    }

    #[test]
    fn test_parse_notations() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("black").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("rgb(255, 0, 0)").unwrap(), Color::rgb(255, 0, 0));
        let c = Color::parse("rgba(0, 0, 0, 0.5)").unwrap();
        assert!((c.alpha - 0.5).abs() < 1e-6);
        assert!(Color::parse("transparent").unwrap().is_transparent());
    }

    #[test]
    fn test_invalid_color_is_transparent() {
        assert!(Color::parse("not-a-color").is_err());
        assert!(Color::parse_or_transparent("not-a-color").is_transparent());
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(Color::rgb(0xf0, 0x0f, 0x0a).to_hex_string(), "#f00f0a");
    }
}
