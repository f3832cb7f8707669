use quadsweep_types::RunSummary;
use std::sync::atomic::{AtomicU64, Ordering};

/// Run-scoped counters shared by all workers of one traversal.
#[derive(Debug, Default)]
pub struct CrawlStats {
    requests: AtomicU64,
    page_requests: AtomicU64,
    accepted: AtomicU64,
    abandoned: AtomicU64,
    failed: AtomicU64,
    cancelled: AtomicU64,
    items: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a partition probe. Returns the running total.
    pub fn record_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_page_request(&self) {
        self.page_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accepted(&self, items: usize) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        self.items.fetch_add(items as u64, Ordering::Relaxed);
    }

    pub fn record_abandoned(&self) {
        self.abandoned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancelled(&self, nodes: usize) {
        self.cancelled.fetch_add(nodes as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            requests: self.requests.load(Ordering::Relaxed),
            page_requests: self.page_requests.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            items: self.items.load(Ordering::Relaxed),
        }
    }
}
