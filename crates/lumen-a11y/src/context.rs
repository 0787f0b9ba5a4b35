//! Check context
//!
//! Collects the data and related nodes of one evaluation. Synchronous
//! checks end with [`CheckContext::finish`]; asynchronous checks take an
//! [`AsyncResolver`] from [`CheckContext::start_async`] and the caller
//! waits with [`CheckContext::finish_async`].

use std::time::Duration;

use smol::channel::{Receiver, Sender};

use crate::data::CheckData;
use crate::verdict::{CheckResult, Verdict};
use crate::A11yError;

/// Per-evaluation scratch state
#[derive(Debug)]
pub struct CheckContext<N> {
    data: CheckData,
    related: Vec<N>,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    receiver: Receiver<Verdict>,
    on_timeout: Verdict,
}

impl<N> Default for CheckContext<N> {
    fn default() -> Self {
        Self { data: CheckData::default(), related: Vec::new(), pending: None }
    }
}

impl<N> CheckContext<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, data: CheckData) {
        self.data = data;
    }

    pub fn data(&self) -> &CheckData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut CheckData {
        &mut self.data
    }

    /// Replace the related nodes
    pub fn related_nodes(&mut self, nodes: impl IntoIterator<Item = N>) {
        self.related = nodes.into_iter().collect();
    }

    pub fn related(&self) -> &[N] {
        &self.related
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.data = CheckData::default();
        self.related.clear();
        self.pending = None;
    }

    /// Whether an asynchronous resolution is outstanding
    pub fn is_async(&self) -> bool {
        self.pending.is_some()
    }

    /// Switch to asynchronous resolution
    ///
    /// The verdict comes from the returned resolver, or `on_timeout` if it
    /// is dropped or never fires in time.
    pub fn start_async(&mut self, on_timeout: Verdict) -> AsyncResolver {
        let (sender, receiver) = smol::channel::bounded(1);
        self.pending = Some(Pending { receiver, on_timeout });
        AsyncResolver { sender }
    }

    pub fn finish(mut self, verdict: Verdict) -> CheckResult<N> {
        if let Verdict::CannotDetermine(key) = verdict {
            self.data.message_key.get_or_insert(key);
        }
        CheckResult { verdict, data: self.data, related_nodes: self.related }
    }

    /// Block until the resolver fires or `timeout` elapses
    pub fn finish_async(mut self, timeout: Duration) -> Result<CheckResult<N>, A11yError> {
        let Pending { receiver, on_timeout } = self.pending.take().ok_or(A11yError::NotAsync)?;

        let resolved = smol::block_on(smol::future::or(async { receiver.recv().await.ok() }, async {
            smol::Timer::after(timeout).await;
            None
        }));

        let verdict = match resolved {
            Some(verdict) => verdict,
            None => {
                tracing::debug!(?timeout, %on_timeout, "asynchronous check unresolved");
                on_timeout
            }
        };
        Ok(self.finish(verdict))
    }
}

/// Fire-once handle that settles an asynchronous check
///
/// `Send`, so a probe may answer from another thread.
#[derive(Debug)]
pub struct AsyncResolver {
    sender: Sender<Verdict>,
}

impl AsyncResolver {
    pub fn resolve(self, verdict: Verdict) {
        // Closed means the waiter already gave up
        let _ = self.sender.try_send(verdict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::MessageKey;

    #[test]
    fn test_finish_carries_data_and_related() {
        let mut ctx: CheckContext<u32> = CheckContext::new();
        ctx.related_nodes([3, 1]);
        ctx.set_data(CheckData::message(MessageKey::BgImage));
        let result = ctx.finish(Verdict::CannotDetermine(MessageKey::BgImage));
        assert_eq!(result.related_nodes, vec![3, 1]);
        assert_eq!(result.data.message_key, Some(MessageKey::BgImage));
    }

    #[test]
    fn test_reset() {
        let mut ctx: CheckContext<u32> = CheckContext::new();
        ctx.related_nodes([1]);
        ctx.data_mut().fg_color = Some("#000000".into());
        let _resolver = ctx.start_async(Verdict::Fail);
        ctx.reset();
        assert!(ctx.related().is_empty());
        assert_eq!(ctx.data(), &CheckData::default());
        assert!(!ctx.is_async());
    }

    #[test]
    fn test_resolved_before_wait() {
        let mut ctx: CheckContext<u32> = CheckContext::new();
        let resolver = ctx.start_async(Verdict::Fail);
        resolver.resolve(Verdict::Pass);
        let result = ctx.finish_async(Duration::from_secs(5)).unwrap();
        assert_eq!(result.verdict, Verdict::Pass);
    }

    #[test]
    fn test_timeout_verdict() {
        let mut ctx: CheckContext<u32> = CheckContext::new();
        let _resolver = ctx.start_async(Verdict::CannotDetermine(MessageKey::Timeout));
        let result = ctx.finish_async(Duration::from_millis(10)).unwrap();
        assert_eq!(result.verdict, Verdict::CannotDetermine(MessageKey::Timeout));
        assert_eq!(result.data.message_key, Some(MessageKey::Timeout));
    }

    #[test]
    fn test_dropped_resolver_settles_immediately() {
        let mut ctx: CheckContext<u32> = CheckContext::new();
        drop(ctx.start_async(Verdict::Fail));
        let result = ctx.finish_async(Duration::from_secs(60)).unwrap();
        assert_eq!(result.verdict, Verdict::Fail);
    }

    #[test]
    fn test_finish_async_without_start() {
        let ctx: CheckContext<u32> = CheckContext::new();
        assert!(matches!(ctx.finish_async(Duration::from_millis(1)), Err(A11yError::NotAsync)));
    }

    #[test]
    fn test_resolve_from_other_thread() {
        let mut ctx: CheckContext<u32> = CheckContext::new();
        let resolver = ctx.start_async(Verdict::Fail);
        let handle = std::thread::spawn(move || resolver.resolve(Verdict::Pass));
        let result = ctx.finish_async(Duration::from_secs(5)).unwrap();
        handle.join().unwrap();
        assert_eq!(result.verdict, Verdict::Pass);
    }
}
