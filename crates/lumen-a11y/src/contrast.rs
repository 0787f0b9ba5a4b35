//! `color-contrast`
//!
//! Compares the resolved text color against the resolved background with
//! the WCAG ratio. Every step either settles the verdict or hands over to
//! the next; ambiguity ends in cannot-determine, never in a guess.

use lumen_css::contrast_ratio;
use lumen_layout::VirtualNode;
use lumen_layout::visibility::is_visible;

use crate::background::{Background, resolve_background};
use crate::check::Check;
use crate::context::CheckContext;
use crate::data::{CheckData, Ratio};
use crate::foreground::resolve_foreground;
use crate::options::ContrastOptions;
use crate::text::{has_only_non_bmp, visible_text};
use crate::verdict::{MessageKey, Verdict};

/// Text size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
}

/// Classify a font size (px) and weight
pub fn classify_text(font_size_px: f64, bold: bool, options: &ContrastOptions) -> TextSize {
    let pt = (font_size_px * 72.0).ceil() / 96.0;
    let threshold = if bold { options.bold_text_pt } else { options.large_text_pt };
    if pt >= threshold { TextSize::Large } else { TextSize::Normal }
}

/// The `color-contrast` check
#[derive(Debug, Clone, Default)]
pub struct ColorContrast {
    options: ContrastOptions,
}

impl ColorContrast {
    pub fn new(options: ContrastOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ContrastOptions {
        &self.options
    }

    fn cannot_determine<N>(ctx: &mut CheckContext<N>, key: MessageKey) -> Verdict {
        ctx.data_mut().message_key = Some(key);
        Verdict::CannotDetermine(key)
    }

    fn evaluate_contrast<N: VirtualNode>(&self, node: N, ctx: &mut CheckContext<N>) -> Verdict {
        let options = &self.options;
        if !is_visible(node) {
            return Verdict::Pass;
        }

        let text = visible_text(node);
        if text.is_empty() && !options.ignore_length {
            return Self::cannot_determine(ctx, MessageKey::ShortTextContent);
        }
        if options.ignore_unicode && has_only_non_bmp(&text) {
            return Self::cannot_determine(ctx, MessageKey::NonBmp);
        }

        let (bg, contributors) = match resolve_background(node) {
            Background::Resolved { color, contributors } => (color, contributors),
            Background::Indeterminate { reason, implicated } => {
                ctx.set_data(CheckData {
                    message_key: Some(reason),
                    contrast_ratio: Some(Ratio::ZERO),
                    ..CheckData::default()
                });
                ctx.related_nodes(implicated);
                return Verdict::CannotDetermine(reason);
            }
        };
        let (Some(style), Some(fg)) = (node.style(), resolve_foreground(node, bg, options.shadow_outline_em_max))
        else {
            return Self::cannot_determine(ctx, MessageKey::NoLayout);
        };

        let raw = contrast_ratio(fg.fill, bg);
        let mut data = CheckData {
            fg_color: Some(fg.fill.to_hex_string()),
            bg_color: Some(bg.to_hex_string()),
            ..CheckData::default()
        };
        if fg.fill.same_rgb(&bg) || Ratio::truncated(raw) == Ratio::ONE {
            data.message_key = Some(MessageKey::EqualRatio);
            data.contrast_ratio = Some(Ratio::ONE);
            ctx.set_data(data);
            return Verdict::CannotDetermine(MessageKey::EqualRatio);
        }

        let ratio = match fg.outline {
            Some(outline) => raw.max(contrast_ratio(bg, outline)).max(contrast_ratio(outline, fg.fill)),
            None => raw,
        };
        let bold = style.is_bold(options.bold_value);
        let large = classify_text(style.font_size, bold, options) == TextSize::Large;
        let expected = options.expected_ratio(large);
        let passes = options.thresholds(large).is_outside(ratio) || ratio >= expected;

        data.contrast_ratio = Some(Ratio::truncated(ratio));
        data.font_size = Some(CheckData::font_size_label(style.font_size));
        data.font_weight = Some(if bold { "bold" } else { "normal" }.to_string());
        data.expected_contrast_ratio = Some(CheckData::ratio_label(expected));
        data.shadow_color = fg.outline.map(|c| c.to_hex_string());
        ctx.set_data(data);

        tracing::debug!(node = %node.label(), ratio, expected, large, passes, "contrast evaluated");
        if passes {
            return Verdict::Pass;
        }
        if text.chars().count() == 1 && !options.ignore_length {
            return Self::cannot_determine(ctx, MessageKey::ShortTextContent);
        }
        ctx.related_nodes(contributors);
        Verdict::Fail
    }
}

impl Check for ColorContrast {
    fn id(&self) -> &'static str {
        "color-contrast"
    }

    fn evaluate<N: VirtualNode>(&self, node: N, ctx: &mut CheckContext<N>) -> Option<Verdict> {
        Some(self.evaluate_contrast(node, ctx))
    }
}
