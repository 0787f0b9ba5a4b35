//! Engine Configuration

use std::path::Path;

use lumen_a11y::{ContrastOptions, FrameTestedOptions};
use serde::{Deserialize, Serialize};

/// Engine configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Check ids to run; unknown ids are ignored
    pub checks: Vec<String>,

    /// Options of `color-contrast`
    pub color_contrast: ContrastOptions,

    /// Options of `frame-tested`
    pub frame_tested: FrameTestedOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checks: vec![
                "color-contrast".to_string(),
                "link-in-text-block".to_string(),
                "frame-tested".to_string(),
            ],
            color_contrast: ContrastOptions::default(),
            frame_tested: FrameTestedOptions::default(),
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading config");
        Self::from_json(&json)
    }

    pub fn is_enabled(&self, check_id: &str) -> bool {
        self.checks.iter().any(|id| id == check_id)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_all_checks() {
        let config = Config::default();
        assert!(config.is_enabled("color-contrast"));
        assert!(config.is_enabled("link-in-text-block"));
        assert!(config.is_enabled("frame-tested"));
        assert!(!config.is_enabled("aria-allowed-role"));
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(
            r#"{
                "checks": ["color-contrast"],
                "colorContrast": {"ignoreLength": true, "contrastRatio": {"normal": {"expected": 7}}},
                "frameTested": {"isViolation": true}
            }"#,
        )
        .unwrap();
        assert!(config.is_enabled("color-contrast"));
        assert!(!config.is_enabled("frame-tested"));
        assert!(config.color_contrast.ignore_length);
        assert!(config.color_contrast.ignore_unicode);
        assert_eq!(config.color_contrast.expected_ratio(false), 7.0);
        assert!(config.frame_tested.is_violation);
        assert_eq!(config.frame_tested.timeout, 10_000);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Config::from_json("{\"checks\": 3}"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/nonexistent/lumen.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/lumen.json"));
    }
}
