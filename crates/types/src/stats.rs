use serde::{Deserialize, Serialize};

/// End-of-run report for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Partition probes sent to the provider (first page of each node)
    pub requests: u64,
    /// Follow-up page fetches inside accepted partitions
    pub page_requests: u64,
    /// Partitions whose pages reached the sink
    pub accepted: u64,
    /// Nodes given up at the depth limit
    pub abandoned: u64,
    /// Nodes lost to network or provider errors
    pub failed: u64,
    /// Nodes dropped because the run was stopped
    pub cancelled: u64,
    /// Items forwarded to the sink
    pub items: u64,
}

impl RunSummary {
    /// Every provider call made during the run.
    pub fn total_provider_calls(&self) -> u64 {
        self.requests + self.page_requests
    }

    /// Number of nodes that reached a terminal outcome.
    pub fn resolved_nodes(&self) -> u64 {
        self.accepted + self.abandoned + self.failed + self.cancelled
    }
}
