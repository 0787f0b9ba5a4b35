//! Check verdicts

use std::fmt;

use serde::Serialize;

use crate::data::CheckData;

/// Why a check could not reach a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    /// No visible text, or a single character that fails
    ShortTextContent,
    /// Text made only of symbol / private-use characters
    NonBmp,
    BgImage,
    BgGradient,
    /// A generated `::before`/`::after` box paints over the text
    PseudoContent,
    /// Another element covers the text
    BgOverlap,
    /// Text and background resolve to the same color
    EqualRatio,
    /// Node carries no style or geometry
    NoLayout,
    /// Link text differs from its block enough that focus/hover states need a human
    FgContrast,
    BgContrast,
    /// An asynchronous check gave up waiting
    Timeout,
}

impl MessageKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShortTextContent => "shortTextContent",
            Self::NonBmp => "nonBmp",
            Self::BgImage => "bgImage",
            Self::BgGradient => "bgGradient",
            Self::PseudoContent => "pseudoContent",
            Self::BgOverlap => "bgOverlap",
            Self::EqualRatio => "equalRatio",
            Self::NoLayout => "noLayout",
            Self::FgContrast => "fgContrast",
            Self::BgContrast => "bgContrast",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one check on one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    CannotDetermine(MessageKey),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Needs review
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::CannotDetermine(_))
    }

    pub fn reason(&self) -> Option<MessageKey> {
        match self {
            Self::CannotDetermine(key) => Some(*key),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Fail => f.write_str("fail"),
            Self::CannotDetermine(key) => write!(f, "cannot-determine ({key})"),
        }
    }
}

/// Verdict plus diagnostics, written once per evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult<N> {
    pub verdict: Verdict,
    pub data: CheckData,
    /// Elements that explain the verdict, most relevant first
    pub related_nodes: Vec<N>,
}
