//! Exhaustive enumeration of result-capped, region-based search APIs.
//!
//! Search endpoints that only let a query page through the first N matches
//! hide everything beyond that cap. quadsweep splits the search region into
//! equal cells, recursively, until every cell's total count fits under the
//! cap, and forwards the pages of those cells to a [`Sink`].
//!
//! ## Features
//! - **Adaptive splitting**: regions with zero or too many matches are split
//!   `factor x factor`; the recursion is bounded by `max_depth`
//! - **Worker pool**: a fixed number of workers share one work queue, which
//!   bounds in-flight provider calls
//! - **Failure isolation**: a failed node loses only its own subtree
//! - **Cancellation**: in-flight nodes finish, queued work is dropped
//!
//! ```rust
//! use async_trait::async_trait;
//! use quadsweep::{MemorySink, PartitionScheduler, Query, Region, SearchFilters};
//! use quadsweep::{SearchProvider, SearchResult};
//! use std::sync::Arc;
//!
//! struct Fixed;
//!
//! #[async_trait]
//! impl SearchProvider for Fixed {
//!     async fn execute(&self, _query: &Query) -> quadsweep::Result<SearchResult> {
//!         Ok(SearchResult::new(3, vec![serde_json::json!({"id": 1})]))
//!     }
//! }
//!
//! let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! rt.block_on(async {
//!     let sink = Arc::new(MemorySink::new());
//!     let scheduler = PartitionScheduler::builder()
//!         .provider(Arc::new(Fixed))
//!         .sink(sink.clone())
//!         .build()
//!         .unwrap();
//!
//!     let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
//!     let summary = scheduler.run(Query::new(region, SearchFilters::default())).await;
//!     assert_eq!(summary.accepted, 1);
//!     assert_eq!(sink.page_count(), 1);
//! });
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod provider;
pub mod scheduler;
pub mod sink;

pub use builder::SchedulerBuilder;
pub use config::CrawlConfig;
pub use error::{CrawlError, Result};
pub use provider::{SearchProvider, SearchResult};
pub use scheduler::{CrawlStats, NodeOutcome, PartitionScheduler, TraversalNode};
pub use sink::{AcceptedPage, JsonLinesSink, MemorySink, NullSink, Sink};

pub use quadsweep_types::{
    HomeStatus, Paging, Query, Region, RegionBounds, RegionError, RunSummary, SearchFilters,
};
pub use tokio_util::sync::CancellationToken;
