//! Check options
//!
//! Every field is optional on the wire; missing values take the defaults
//! below.

use serde::{Deserialize, Serialize};

use crate::A11yError;

/// Expected ratio for normal text when unset
pub const NORMAL_TEXT_RATIO: f64 = 4.5;

/// Expected ratio for large text when unset
pub const LARGE_TEXT_RATIO: f64 = 3.0;

/// Audit band for one text class
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatioThresholds {
    pub expected: Option<f64>,
    /// Ratios below this are not audited
    pub min_threshold: Option<f64>,
    /// Ratios above this are not audited
    pub max_threshold: Option<f64>,
}

impl RatioThresholds {
    /// Whether `ratio` falls outside the audited band
    pub fn is_outside(&self, ratio: f64) -> bool {
        self.min_threshold.is_some_and(|min| ratio < min) || self.max_threshold.is_some_and(|max| ratio > max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastRatioOptions {
    pub normal: RatioThresholds,
    pub large: RatioThresholds,
}

/// Options of the `color-contrast` check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContrastOptions {
    /// Report text made only of symbol characters as cannot-determine
    pub ignore_unicode: bool,
    /// Evaluate empty and single-character text like any other
    pub ignore_length: bool,
    /// Font weight at which text counts as bold
    pub bold_value: u16,
    /// Size in pt at which bold text is large
    pub bold_text_pt: f64,
    /// Size in pt at which text is large
    pub large_text_pt: f64,
    /// Widest blur, in em, for a text-shadow to count as an outline
    pub shadow_outline_em_max: f64,
    pub contrast_ratio: ContrastRatioOptions,
}

impl Default for ContrastOptions {
    fn default() -> Self {
        Self {
            ignore_unicode: true,
            ignore_length: false,
            bold_value: 700,
            bold_text_pt: 14.0,
            large_text_pt: 18.0,
            shadow_outline_em_max: 0.1,
            contrast_ratio: ContrastRatioOptions::default(),
        }
    }
}

impl ContrastOptions {
    pub fn from_json(json: &str) -> Result<Self, A11yError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn thresholds(&self, large: bool) -> &RatioThresholds {
        if large { &self.contrast_ratio.large } else { &self.contrast_ratio.normal }
    }

    /// Ratio the text class must reach
    pub fn expected_ratio(&self, large: bool) -> f64 {
        let fallback = if large { LARGE_TEXT_RATIO } else { NORMAL_TEXT_RATIO };
        self.thresholds(large).expected.unwrap_or(fallback)
    }
}

/// Options of the `frame-tested` check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameTestedOptions {
    /// Milliseconds to wait for the frame to answer
    pub timeout: u64,
    /// Treat a silent frame as a violation instead of needing review
    pub is_violation: bool,
}

impl Default for FrameTestedOptions {
    fn default() -> Self {
        Self { timeout: 10_000, is_violation: false }
    }
}

impl FrameTestedOptions {
    pub fn from_json(json: &str) -> Result<Self, A11yError> {
        Ok(serde_json::from_str(json)?)
    }
}
