//! Error taxonomy for a crawl.
//!
//! Only [`CrawlError::InvalidArgument`] stops a run, and only before it
//! starts. The other variants describe the fate of a single traversal node and
//! are counted in the run summary. Reaching the depth limit is not an error.

use quadsweep_types::RegionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// Malformed region or configuration.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transient transport failure, including timeouts.
    #[error("Network error: {0}")]
    Network(String),

    /// Response with an unexpected shape or status.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CrawlError {
    pub fn is_network(&self) -> bool {
        matches!(self, CrawlError::Network(_))
    }
}

impl From<RegionError> for CrawlError {
    fn from(err: RegionError) -> Self {
        CrawlError::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
