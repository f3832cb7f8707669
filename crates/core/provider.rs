//! The search provider boundary.
//!
//! The scheduler only needs two things from a response: the exact number of
//! matches in the queried region, and the items on the requested page.

use crate::error::Result;
use async_trait::async_trait;
use quadsweep_types::Query;
use serde::{Deserialize, Serialize};

/// Total-match count plus one page of opaque items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: u64,
    pub items: Vec<serde_json::Value>,
}

impl SearchResult {
    pub fn new(total_count: u64, items: Vec<serde_json::Value>) -> Self {
        Self { total_count, items }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Executes a [`Query`] against a remote search endpoint.
///
/// Implementations report transport failures and timeouts as
/// [`CrawlError::Network`](crate::CrawlError::Network) and malformed
/// responses as [`CrawlError::Provider`](crate::CrawlError::Provider).
/// Retrying, if any, happens inside the implementation.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn execute(&self, query: &Query) -> Result<SearchResult>;
}
