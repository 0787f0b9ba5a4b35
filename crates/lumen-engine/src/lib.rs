//! Lumen Engine
//!
//! Runs the accessibility checks over nodes of a rendered document (or a
//! serialized snapshot) and sorts the outcomes for reporting.
//!
//! # Example
//! ```rust,ignore
//! use lumen_engine::{Auditor, Config};
//!
//! let auditor = Auditor::new(Config::from_file("lumen.json")?);
//! let report = auditor.audit(doc.root().into_iter().flat_map(|r| r.descendants()))?;
//! println!("{} violations", report.violations.len());
//! ```

mod auditor;
mod config;

pub use auditor::{AuditReport, Auditor, Finding};
pub use config::{Config, ConfigError};

pub use lumen_a11y::{CheckData, CheckResult, MessageKey, Verdict};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Check error: {0}")]
    Check(#[from] lumen_a11y::A11yError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
