//! `link-in-text-block`
//!
//! A link inside running text must be told apart from that text by more
//! than a subtle color change.

use lumen_css::{ComputedStyle, contrast_ratio};
use lumen_layout::VirtualNode;

use crate::background::{Background, resolve_background};
use crate::check::Check;
use crate::context::CheckContext;
use crate::data::{CheckData, Ratio};
use crate::verdict::{MessageKey, Verdict};

/// Color difference that is enough on its own
pub const DISTINCT_RATIO: f64 = 3.0;

/// The `link-in-text-block` check
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkInTextBlock;

/// Closest ancestor that starts a block of text
pub fn parent_block<N: VirtualNode>(node: N) -> Option<N> {
    node.ancestors()
        .find(|a| a.style().is_some_and(|s| s.display.is_block_like()) || a.is_document_element())
}

/// Styled differently from the surrounding block in a way that does not
/// depend on color
pub fn is_visually_distinct(link: &ComputedStyle, block: &ComputedStyle) -> bool {
    link.has_background_image()
        || link.border_top.is_painted(link.color)
        || link.border_bottom.is_painted(link.color)
        || link.outline.is_painted(link.color)
        || link.font_family.first() != block.font_family.first()
        || link.text_decoration != block.text_decoration
        || link.font_weight != block.font_weight
        || link.font_style != block.font_style
        || link.font_size != block.font_size
}

impl LinkInTextBlock {
    fn evaluate_link<N: VirtualNode>(&self, link: N, ctx: &mut CheckContext<N>) -> Verdict {
        let Some(link_style) = link.style() else {
            return Verdict::CannotDetermine(MessageKey::NoLayout);
        };
        if link_style.display.is_block_like() {
            return Verdict::Fail;
        }
        let Some(block) = parent_block(link) else {
            return Verdict::Pass;
        };
        ctx.related_nodes([block]);
        let Some(block_style) = block.style() else {
            return Verdict::CannotDetermine(MessageKey::NoLayout);
        };

        if is_visually_distinct(link_style, block_style) {
            return Verdict::Pass;
        }

        if link_style.color.same_rgb(&block_style.color) {
            return Verdict::Pass;
        }
        let fg_ratio = contrast_ratio(link_style.color, block_style.color);
        if fg_ratio >= DISTINCT_RATIO {
            ctx.set_data(CheckData {
                message_key: Some(MessageKey::FgContrast),
                contrast_ratio: Some(Ratio::truncated(fg_ratio)),
                ..CheckData::default()
            });
            return Verdict::CannotDetermine(MessageKey::FgContrast);
        }

        let link_bg = resolve_background(link);
        let block_bg = resolve_background(block);
        let (link_bg, block_bg) = match (link_bg, block_bg) {
            (Background::Resolved { color: a, .. }, Background::Resolved { color: b, .. }) => (a, b),
            (Background::Indeterminate { reason, .. }, _) | (_, Background::Indeterminate { reason, .. }) => {
                tracing::debug!(link = %link.label(), %reason, "link background indeterminate");
                ctx.set_data(CheckData::message(reason));
                return Verdict::CannotDetermine(reason);
            }
        };

        let bg_ratio = contrast_ratio(link_bg, block_bg);
        if bg_ratio >= DISTINCT_RATIO {
            ctx.set_data(CheckData {
                message_key: Some(MessageKey::BgContrast),
                contrast_ratio: Some(Ratio::truncated(bg_ratio)),
                ..CheckData::default()
            });
            return Verdict::CannotDetermine(MessageKey::BgContrast);
        }
        Verdict::Fail
    }
}

impl Check for LinkInTextBlock {
    fn id(&self) -> &'static str {
        "link-in-text-block"
    }

    fn evaluate<N: VirtualNode>(&self, node: N, ctx: &mut CheckContext<N>) -> Option<Verdict> {
        Some(self.evaluate_link(node, ctx))
    }
}
