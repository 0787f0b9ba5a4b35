//! Text color resolution

use lumen_css::{Color, TextShadow};
use lumen_layout::VirtualNode;
use lumen_layout::visibility::cumulative_opacity;

/// Effective text colors over a known background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Foreground {
    /// Text fill composited over the background
    pub fill: Color,
    /// Thin text-shadow outline composited over the background
    pub outline: Option<Color>,
}

/// Resolve the text colors of `node` painted over `bg`
///
/// `None` when the node has no computed style.
pub fn resolve_foreground<N: VirtualNode>(node: N, bg: Color, shadow_outline_em_max: f64) -> Option<Foreground> {
    let style = node.style()?;
    let opacity = cumulative_opacity(node);
    let fill = style.color.fade(opacity).over(bg);
    let outline = shadow_outline(&style.text_shadow, style.font_size, style.color, opacity, bg, shadow_outline_em_max);
    Some(Foreground { fill, outline })
}

/// Color of thin text shadows acting as an outline around the glyphs
///
/// Any layer blurred wider than `em_max` em disqualifies the outline.
/// Layers whose offset exceeds their blur leave the glyph edge bare and
/// add nothing.
pub fn shadow_outline(
    shadows: &[TextShadow],
    font_size: f64,
    current_color: Color,
    opacity: f64,
    bg: Color,
    em_max: f64,
) -> Option<Color> {
    if shadows.is_empty() || font_size <= 0.0 {
        return None;
    }
    if shadows.iter().any(|s| s.blur >= em_max * font_size) {
        return None;
    }

    let mut painted = false;
    // First listed paints on top
    let outline = shadows.iter().rev().fold(bg, |below, shadow| {
        if shadow.offset_x.abs().max(shadow.offset_y.abs()) > shadow.blur {
            return below;
        }
        let falloff = (0.185 / (shadow.blur / font_size + 0.4)).clamp(0.0, 1.0);
        let color = shadow.resolved_color(current_color).fade(falloff * opacity);
        painted |= !color.is_transparent();
        color.over(below)
    });
    painted.then_some(outline)
}
