//! `frame-tested`
//!
//! Nested frames must run their own auditor. The host answers through a
//! [`FrameProbe`]; silence past the timeout settles the check.

use std::time::Duration;

use lumen_dom::NodeId;
use lumen_layout::VirtualNode;

use crate::check::Check;
use crate::context::CheckContext;
use crate::options::FrameTestedOptions;
use crate::verdict::{MessageKey, Verdict};

/// Called once when the frame answers
pub type FrameResponse = Box<dyn FnOnce() + Send>;

/// Host hook that pings the auditor inside a frame
pub trait FrameProbe {
    /// Ask `frame`; call `respond` if and when it answers
    fn ping(&self, frame: NodeId, respond: FrameResponse);
}

/// The `frame-tested` check
#[derive(Debug, Clone)]
pub struct FrameTested<P> {
    probe: P,
    options: FrameTestedOptions,
}

impl<P: FrameProbe> FrameTested<P> {
    pub fn new(probe: P, options: FrameTestedOptions) -> Self {
        Self { probe, options }
    }

    pub fn options(&self) -> &FrameTestedOptions {
        &self.options
    }
}

impl<P: FrameProbe> Check for FrameTested<P> {
    fn id(&self) -> &'static str {
        "frame-tested"
    }

    fn evaluate<N: VirtualNode>(&self, node: N, ctx: &mut CheckContext<N>) -> Option<Verdict> {
        let on_timeout = if self.options.is_violation {
            Verdict::Fail
        } else {
            Verdict::CannotDetermine(MessageKey::Timeout)
        };
        let resolver = ctx.start_async(on_timeout);
        tracing::debug!(frame = %node.label(), timeout_ms = self.options.timeout, "pinging frame");
        self.probe.ping(node.node_id(), Box::new(move || resolver.resolve(Verdict::Pass)));
        None
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.options.timeout)
    }
}
