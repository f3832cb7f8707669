#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use quadsweep::{CrawlError, Query, Region, SearchFilters, SearchProvider, SearchResult, Sink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Provider whose answers come from a closure. Records every query it sees and
/// the highest number of calls that were in flight at once.
pub struct ScriptedProvider<F> {
    respond: F,
    delay: Option<Duration>,
    calls: Mutex<Vec<Query>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl<F> ScriptedProvider<F>
where
    F: Fn(&Query) -> quadsweep::Result<SearchResult> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            delay: None,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Query> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F> SearchProvider for ScriptedProvider<F>
where
    F: Fn(&Query) -> quadsweep::Result<SearchResult> + Send + Sync,
{
    async fn execute(&self, query: &Query) -> quadsweep::Result<SearchResult> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = (self.respond)(query);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Sink that refuses every page.
pub struct FailingSink;

#[async_trait]
impl Sink for FailingSink {
    async fn accept(&self, _items: Vec<serde_json::Value>, _origin: &Query) -> quadsweep::Result<()> {
        Err(CrawlError::Sink("disk full".to_string()))
    }
}

/// `count` matches, with the requested page filled as far as the count allows.
pub fn page_of(query: &Query, count: u64) -> SearchResult {
    let paging = query.paging();
    let skip = u64::from(paging.page_number - 1) * u64::from(paging.page_size);
    let on_page = count.saturating_sub(skip).min(u64::from(paging.page_size));
    let items = (0..on_page)
        .map(|i| serde_json::json!({ "id": skip + i }))
        .collect();
    SearchResult::new(count, items)
}

pub fn root_query(region: Region) -> Query {
    Query::new(region, SearchFilters::default())
}

pub fn unit_square() -> Region {
    Region::new(0.0, 0.0, 2.0, 2.0).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
