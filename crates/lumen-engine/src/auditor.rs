//! Auditor - Main entry point

use lumen_a11y::{Check, CheckResult, ColorContrast, FrameProbe, FrameTested, LinkInTextBlock, Verdict};
use lumen_layout::VirtualNode;

use crate::{Config, EngineError};

/// One check outcome on one node
#[derive(Debug, Clone, PartialEq)]
pub struct Finding<N> {
    pub check: &'static str,
    pub node: N,
    pub result: CheckResult<N>,
}

/// Findings bucketed by verdict
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport<N> {
    pub passes: Vec<Finding<N>>,
    pub violations: Vec<Finding<N>>,
    /// Cannot-determine outcomes that need a human
    pub incomplete: Vec<Finding<N>>,
}

impl<N> Default for AuditReport<N> {
    fn default() -> Self {
        Self { passes: Vec::new(), violations: Vec::new(), incomplete: Vec::new() }
    }
}

impl<N> AuditReport<N> {
    fn record(&mut self, finding: Finding<N>) {
        let bucket = match finding.result.verdict {
            Verdict::Pass => &mut self.passes,
            Verdict::Fail => &mut self.violations,
            Verdict::CannotDetermine(_) => &mut self.incomplete,
        };
        bucket.push(finding);
    }

    pub fn len(&self) -> usize {
        self.passes.len() + self.violations.len() + self.incomplete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All findings of one check, in bucket order
    pub fn for_check<'a>(&'a self, check: &'a str) -> impl Iterator<Item = &'a Finding<N>> {
        self.passes
            .iter()
            .chain(&self.violations)
            .chain(&self.incomplete)
            .filter(move |f| f.check == check)
    }
}

/// Runs the configured checks over document nodes
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    config: Config,
}

impl Auditor {
    pub fn new(config: Config) -> Self {
        tracing::info!(version = crate::VERSION, checks = ?config.checks, "auditor initialized");
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `check` on every node, skipping checks the config disables
    pub fn run_check<C: Check, N: VirtualNode>(
        &self,
        check: &C,
        nodes: impl IntoIterator<Item = N>,
        report: &mut AuditReport<N>,
    ) -> Result<(), EngineError> {
        if !self.config.is_enabled(check.id()) {
            tracing::debug!(check = check.id(), "check disabled");
            return Ok(());
        }
        for node in nodes {
            let result = check.run(node)?;
            tracing::debug!(check = check.id(), node = %node.label(), verdict = %result.verdict, "node checked");
            report.record(Finding { check: check.id(), node, result });
        }
        Ok(())
    }

    /// Run the synchronous checks over `nodes`
    ///
    /// `color-contrast` applies to elements with their own text,
    /// `link-in-text-block` to links.
    pub fn audit<N: VirtualNode>(&self, nodes: impl IntoIterator<Item = N>) -> Result<AuditReport<N>, EngineError> {
        let nodes: Vec<N> = nodes.into_iter().filter(|n| n.is_element()).collect();
        let mut report = AuditReport::default();

        let contrast = ColorContrast::new(self.config.color_contrast.clone());
        self.run_check(&contrast, nodes.iter().copied().filter(|n| has_own_text(*n)), &mut report)?;
        self.run_check(&LinkInTextBlock, nodes.iter().copied().filter(|n| is_link(*n)), &mut report)?;

        summarize(&report);
        Ok(report)
    }

    /// Ask every frame among `nodes` whether it ran its own audit
    pub fn audit_frames<P: FrameProbe, N: VirtualNode>(
        &self,
        probe: P,
        nodes: impl IntoIterator<Item = N>,
    ) -> Result<AuditReport<N>, EngineError> {
        let mut report = AuditReport::default();
        let check = FrameTested::new(probe, self.config.frame_tested);
        let frames = nodes.into_iter().filter(|n| matches!(n.tag_name(), Some("iframe" | "frame")));
        self.run_check(&check, frames, &mut report)?;
        summarize(&report);
        Ok(report)
    }
}

fn has_own_text<N: VirtualNode>(node: N) -> bool {
    node.children().iter().any(|c| c.text().is_some_and(|t| !t.trim().is_empty()))
}

fn is_link<N: VirtualNode>(node: N) -> bool {
    (node.tag_name() == Some("a") && node.attr("href").is_some()) || node.attr("role") == Some("link")
}

fn summarize<N>(report: &AuditReport<N>) {
    tracing::info!(
        passes = report.passes.len(),
        violations = report.violations.len(),
        incomplete = report.incomplete.len(),
        "audit complete"
    );
}
