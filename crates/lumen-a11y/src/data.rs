//! Diagnostic data attached to check results

use std::fmt;

use serde::{Serialize, Serializer};

use crate::verdict::MessageKey;

/// Contrast ratio truncated (not rounded) to two decimals
///
/// Truncation keeps a ratio of 4.499 from displaying as a passing 4.50.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Ratio(f64);

impl Ratio {
    pub const ZERO: Ratio = Ratio(0.0);
    pub const ONE: Ratio = Ratio(1.0);

    pub fn truncated(value: f64) -> Self {
        Self((value * 100.0).floor() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

/// Check payload; unset fields are omitted when serialized
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<MessageKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_ratio: Option<Ratio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_contrast_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
}

impl CheckData {
    /// Only a message key
    pub fn message(key: MessageKey) -> Self {
        Self { message_key: Some(key), ..Self::default() }
    }

    /// `"10.5pt (14px)"`
    pub fn font_size_label(px: f64) -> String {
        format!("{}pt ({}px)", trim_number(px * 72.0 / 96.0, 1), trim_number(px, 2))
    }

    /// `"4.5:1"`
    pub fn ratio_label(expected: f64) -> String {
        format!("{}:1", trim_number(expected, 2))
    }
}

/// Fixed decimals with trailing zeros dropped
fn trim_number(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
