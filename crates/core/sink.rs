//! Destinations for accepted result pages.

use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use quadsweep_types::{Paging, Query, Region};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Receives the pages of every accepted partition.
///
/// The scheduler hands a page off once and moves on: a failing sink is logged
/// and never retried.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn accept(&self, items: Vec<serde_json::Value>, origin: &Query) -> Result<()>;
}

/// One page as recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedPage {
    pub query: Query,
    pub items: Vec<serde_json::Value>,
}

/// Keeps every page in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: Mutex<Vec<AcceptedPage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> Vec<AcceptedPage> {
        self.pages.lock().clone()
    }

    pub fn page_count(&self) -> usize {
        self.pages.lock().len()
    }

    pub fn item_count(&self) -> usize {
        self.pages.lock().iter().map(|p| p.items.len()).sum()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn accept(&self, items: Vec<serde_json::Value>, origin: &Query) -> Result<()> {
        self.pages.lock().push(AcceptedPage {
            query: origin.clone(),
            items,
        });
        Ok(())
    }
}

/// Discards everything. Useful for count-only dry runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl Sink for NullSink {
    async fn accept(&self, _items: Vec<serde_json::Value>, _origin: &Query) -> Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct PageRecord<'a> {
    region: &'a Region,
    page: Paging,
    items: &'a [serde_json::Value],
}

/// Appends one JSON object per page to a file:
/// `{"region": {...}, "page": {...}, "items": [...]}`.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    file: tokio::sync::Mutex<tokio::fs::File>,
}

impl JsonLinesSink {
    /// Open `path` for appending, creating it if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        log::info!("Writing accepted pages to {}", path.display());
        Ok(Self {
            path,
            file: tokio::sync::Mutex::new(file),
        })
    }
}

#[async_trait]
impl Sink for JsonLinesSink {
    async fn accept(&self, items: Vec<serde_json::Value>, origin: &Query) -> Result<()> {
        let record = PageRecord {
            region: origin.region(),
            page: origin.paging(),
            items: &items,
        };
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line)
            .await
            .map_err(|e| CrawlError::Sink(format!("{}: {}", self.path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| CrawlError::Sink(format!("{}: {}", self.path.display(), e)))?;
        Ok(())
    }
}
