//! Check interface

use std::time::Duration;

use lumen_layout::VirtualNode;

use crate::context::CheckContext;
use crate::verdict::{CheckResult, Verdict};
use crate::A11yError;

/// Default wait for asynchronous checks
pub const DEFAULT_ASYNC_TIMEOUT: Duration = Duration::from_secs(10);

/// A per-node accessibility check
pub trait Check {
    /// Identifier used in reports, e.g. `color-contrast`
    fn id(&self) -> &'static str;

    /// Evaluate `node`, recording data and related nodes in `ctx`
    ///
    /// Returns `None` when the check went asynchronous through
    /// [`CheckContext::start_async`].
    fn evaluate<N: VirtualNode>(&self, node: N, ctx: &mut CheckContext<N>) -> Option<Verdict>;

    /// How long [`Check::run`] waits for an asynchronous verdict
    fn timeout(&self) -> Duration {
        DEFAULT_ASYNC_TIMEOUT
    }

    /// Evaluate `node` in a fresh context and collect the result
    fn run<N: VirtualNode>(&self, node: N) -> Result<CheckResult<N>, A11yError> {
        let mut ctx = CheckContext::new();
        match self.evaluate(node, &mut ctx) {
            Some(verdict) => Ok(ctx.finish(verdict)),
            None => ctx.finish_async(self.timeout()),
        }
    }
}
