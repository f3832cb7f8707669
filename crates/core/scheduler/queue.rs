use super::node::TraversalNode;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

/// Pending traversal nodes shared by the worker pool.
///
/// `outstanding` counts nodes that were pushed but not yet completed, whether
/// they sit in the channel or are held by a worker. When it drops to zero no
/// worker can produce more work, so `drained` fires and every worker exits.
pub(crate) struct WorkQueue {
    tx: mpsc::UnboundedSender<TraversalNode>,
    rx: Mutex<mpsc::UnboundedReceiver<TraversalNode>>,
    outstanding: AtomicUsize,
    drained: CancellationToken,
}

impl WorkQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
            outstanding: AtomicUsize::new(0),
            drained: CancellationToken::new(),
        }
    }

    pub(crate) fn push(&self, node: TraversalNode) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        if self.tx.send(node).is_err() {
            // The receiver lives as long as the queue; only reachable while dropping.
            self.complete();
        }
    }

    /// Wait for the next node. `None` once the traversal is drained.
    pub(crate) async fn next(&self) -> Option<TraversalNode> {
        let mut rx = tokio::select! {
            biased;
            _ = self.drained.cancelled() => return None,
            rx = self.rx.lock() => rx,
        };
        tokio::select! {
            biased;
            _ = self.drained.cancelled() => None,
            node = rx.recv() => node,
        }
    }

    /// Mark one node as resolved. Children must be pushed before this call.
    pub(crate) fn complete(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.drained.cancel();
        }
    }

    /// Release every waiting worker regardless of outstanding work.
    pub(crate) fn abort(&self) {
        self.drained.cancel();
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }
}
