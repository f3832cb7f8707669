//! Recursive partition traversal.
//!
//! The scheduler probes the root region, then keeps splitting every region
//! whose total count is zero or above the provider cap until each partition
//! fits under the cap or the depth limit is hit. Work is spread over a fixed
//! pool of workers pulling from a shared queue, so the pool size is also the
//! bound on in-flight provider calls.
//!
//! ```rust,no_run
//! use quadsweep::{CrawlConfig, MemorySink, PartitionScheduler, SearchProvider};
//! use quadsweep::{Query, Region, SearchFilters};
//! use std::sync::Arc;
//!
//! # async fn crawl(provider: Arc<dyn SearchProvider>) -> quadsweep::Result<()> {
//! let sink = Arc::new(MemorySink::new());
//! let scheduler = PartitionScheduler::builder()
//!     .provider(provider)
//!     .sink(sink.clone())
//!     .config(CrawlConfig::default().with_max_depth(3))
//!     .build()?;
//!
//! let region = Region::new(-83.741219, 41.522719, -83.357890, 41.774026)?;
//! let summary = scheduler.run(Query::new(region, SearchFilters::default())).await;
//! println!("{} partitions accepted", summary.accepted);
//! # Ok(())
//! # }
//! ```

mod node;
mod queue;
mod stats;
mod worker;

pub use node::{NodeOutcome, TraversalNode};
pub use stats::CrawlStats;

use crate::builder::SchedulerBuilder;
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::provider::SearchProvider;
use crate::sink::Sink;
use queue::WorkQueue;
use quadsweep_types::{Paging, Query, RunSummary};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use worker::Worker;

/// Drives one traversal per `run` call. Holds no per-run state, so a single
/// scheduler can run several traversals, sequentially or concurrently.
pub struct PartitionScheduler {
    provider: Arc<dyn SearchProvider>,
    sink: Arc<dyn Sink>,
    config: CrawlConfig,
}

impl PartitionScheduler {
    pub fn builder() -> SchedulerBuilder {
        SchedulerBuilder::new()
    }

    /// Create a scheduler. Fails with `InvalidArgument` on a bad config.
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        sink: Arc<dyn Sink>,
        config: CrawlConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            sink,
            config,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Traverse from `root` until every partition is resolved.
    pub async fn run(&self, root: Query) -> RunSummary {
        self.run_until(root, CancellationToken::new()).await
    }

    /// Like [`run`](Self::run), but stops scheduling new work once `stop` is
    /// cancelled. Nodes already being executed finish, including their sink
    /// hand-off; queued nodes and the children of in-flight nodes are counted
    /// as cancelled.
    pub async fn run_until(&self, root: Query, stop: CancellationToken) -> RunSummary {
        let root = root
            .with_page_size(self.config.page_size)
            .with_page(Paging::FIRST_PAGE);

        log::info!(
            "Starting traversal of {} (max depth: {}, factor: {}, cap: {}, workers: {})",
            root.region(),
            self.config.max_depth,
            self.config.subdivision_factor,
            self.config.provider_cap,
            self.config.max_concurrent_requests
        );

        let queue = Arc::new(WorkQueue::new());
        let stats = Arc::new(CrawlStats::new());
        queue.push(TraversalNode::root(root));

        let mut workers = JoinSet::new();
        for id in 0..self.config.max_concurrent_requests {
            let worker = Worker {
                id,
                provider: Arc::clone(&self.provider),
                sink: Arc::clone(&self.sink),
                config: self.config.clone(),
                queue: Arc::clone(&queue),
                stats: Arc::clone(&stats),
                stop: stop.clone(),
            };
            workers.spawn(worker.run());
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                // A lost worker never completes its node; release the others.
                log::error!("Worker task failed: {}", err);
                queue.abort();
            }
        }

        let outstanding = queue.outstanding();
        if outstanding > 0 {
            log::warn!("Traversal ended with {} unresolved nodes", outstanding);
        }

        let summary = stats.snapshot();
        log::info!(
            "Traversal finished: {} requests ({} extra pages), {} accepted, {} abandoned, {} failed, {} cancelled, {} items",
            summary.requests,
            summary.page_requests,
            summary.accepted,
            summary.abandoned,
            summary.failed,
            summary.cancelled,
            summary.items
        );
        summary
    }
}
