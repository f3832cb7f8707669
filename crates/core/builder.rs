//! Scheduler builder
//!
//! Assembles a [`PartitionScheduler`] from a provider, an optional sink and a
//! configuration, validating the configuration on `build`.

use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::provider::SearchProvider;
use crate::scheduler::PartitionScheduler;
use crate::sink::{NullSink, Sink};
use std::sync::Arc;

/// Builder for [`PartitionScheduler`].
#[derive(Default)]
pub struct SchedulerBuilder {
    provider: Option<Arc<dyn SearchProvider>>,
    sink: Option<Arc<dyn Sink>>,
    config: CrawlConfig,
}

impl SchedulerBuilder {
    /// Create a builder with the default configuration and no provider.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Where accepted pages go. Defaults to [`NullSink`].
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config = self.config.with_max_depth(max_depth);
        self
    }

    pub fn max_concurrent_requests(mut self, limit: usize) -> Self {
        self.config = self.config.with_max_concurrent_requests(limit);
        self
    }

    /// Build the scheduler.
    pub fn build(self) -> Result<PartitionScheduler> {
        let provider = self.provider.ok_or_else(|| {
            CrawlError::InvalidArgument("a search provider is required".to_string())
        })?;
        let sink = self.sink.unwrap_or_else(|| {
            log::debug!("No sink configured, accepted pages will be discarded");
            Arc::new(NullSink)
        });
        PartitionScheduler::new(provider, sink, self.config)
    }
}
