//! Lumen Accessibility Checks
//!
//! Visual contrast and occlusion evaluation over rendered or serialized
//! nodes.
//!
//! Checks:
//! - `color-contrast`: WCAG contrast of text against its resolved background
//! - `link-in-text-block`: links distinguishable from surrounding text
//! - `frame-tested`: nested frames run their own auditor (asynchronous)

mod background;
mod check;
mod context;
mod contrast;
mod data;
mod foreground;
mod frame_tested;
mod link_in_text_block;
mod options;
mod text;
mod verdict;

pub use background::{Background, LayerKind, PaintLayer, PaintLayers, resolve_background};
pub use check::{Check, DEFAULT_ASYNC_TIMEOUT};
pub use context::{AsyncResolver, CheckContext};
pub use contrast::{ColorContrast, TextSize, classify_text};
pub use data::{CheckData, Ratio};
pub use foreground::{Foreground, resolve_foreground, shadow_outline};
pub use frame_tested::{FrameProbe, FrameResponse, FrameTested};
pub use link_in_text_block::{LinkInTextBlock, is_visually_distinct, parent_block};
pub use options::{ContrastOptions, ContrastRatioOptions, FrameTestedOptions, RatioThresholds};
pub use text::{has_only_non_bmp, is_non_bmp, visible_text};
pub use verdict::{CheckResult, MessageKey, Verdict};

/// Accessibility check errors
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Invalid check options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("Check context has no pending asynchronous resolution")]
    NotAsync,
}
