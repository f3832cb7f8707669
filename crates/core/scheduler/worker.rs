use super::node::{NodeOutcome, TraversalNode};
use super::queue::WorkQueue;
use super::stats::CrawlStats;
use crate::config::CrawlConfig;
use crate::provider::{SearchProvider, SearchResult};
use crate::sink::Sink;
use quadsweep_types::Query;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// One member of the scheduler's pool. Pulls nodes until the queue drains.
pub(crate) struct Worker {
    pub(crate) id: usize,
    pub(crate) provider: Arc<dyn SearchProvider>,
    pub(crate) sink: Arc<dyn Sink>,
    pub(crate) config: CrawlConfig,
    pub(crate) queue: Arc<WorkQueue>,
    pub(crate) stats: Arc<CrawlStats>,
    pub(crate) stop: CancellationToken,
}

impl Worker {
    pub(crate) async fn run(self) {
        log::debug!("Worker {} started", self.id);

        while let Some(node) = self.queue.next().await {
            if self.stop.is_cancelled() {
                self.stats.record_cancelled(1);
                self.queue.complete();
                continue;
            }

            match self.resolve(&node).await {
                NodeOutcome::Accepted { pages, items } => {
                    log::debug!(
                        "Accepted {} ({} pages, {} items)",
                        node.query.region(),
                        pages,
                        items
                    );
                    self.stats.record_accepted(items);
                }
                NodeOutcome::Subdivided(children) => {
                    if self.stop.is_cancelled() {
                        self.stats.record_cancelled(children.len());
                    } else {
                        for child in children {
                            self.queue.push(child);
                        }
                    }
                }
                NodeOutcome::Abandoned => self.stats.record_abandoned(),
                NodeOutcome::Failed(err) => {
                    log::error!(
                        "Node at depth {} for {} failed: {}",
                        node.depth,
                        node.query.region(),
                        err
                    );
                    self.stats.record_failed();
                }
            }

            self.queue.complete();
        }

        log::debug!("Worker {} finished", self.id);
    }

    async fn resolve(&self, node: &TraversalNode) -> NodeOutcome {
        if node.depth > self.config.max_depth {
            log::warn!(
                "Depth limit {} reached, giving up on {}",
                self.config.max_depth,
                node.query.region()
            );
            return NodeOutcome::Abandoned;
        }

        let request = self.stats.record_request();
        let result = match self.provider.execute(&node.query).await {
            Ok(result) => result,
            Err(err) => return NodeOutcome::Failed(err),
        };

        log::info!(
            "{} requests, split: {} bbox: {}, results: {}",
            request,
            node.depth,
            node.query.region(),
            result.total_count
        );

        if result.total_count == 0 || result.total_count > self.config.provider_cap {
            return match node.split(self.config.subdivision_factor) {
                Ok(children) => NodeOutcome::Subdivided(children),
                Err(err) => NodeOutcome::Failed(err),
            };
        }

        self.accept(node, result).await
    }

    /// Fetch the remaining pages of an accepted partition, then hand every page
    /// to the sink. Nothing is forwarded unless all pages arrived.
    async fn accept(&self, node: &TraversalNode, first: SearchResult) -> NodeOutcome {
        let pages = self.config.pages_for(first.total_count);

        let mut fetched: Vec<(Query, Vec<serde_json::Value>)> = Vec::new();
        fetched.push((node.query.clone(), first.items));

        for page in 2..=pages {
            let query = node.query.with_page(page);
            self.stats.record_page_request();
            match self.provider.execute(&query).await {
                Ok(result) => fetched.push((query, result.items)),
                Err(err) => return NodeOutcome::Failed(err),
            }
        }

        let mut items = 0;
        for (query, page_items) in fetched {
            items += page_items.len();
            if let Err(err) = self.sink.accept(page_items, &query).await {
                log::warn!(
                    "Sink rejected page {} of {}: {}",
                    query.paging().page_number,
                    query.region(),
                    err
                );
            }
        }

        NodeOutcome::Accepted { pages, items }
    }
}
