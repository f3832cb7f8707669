//! quadsweep client
//!
//! HTTP implementation of [`quadsweep::SearchProvider`].
//!
//! # Example
//!
//! ```ignore
//! use quadsweep_client::HttpSearchProvider;
//! use std::time::Duration;
//!
//! let provider = HttpSearchProvider::builder("https://search.example.com/api/homes/search")
//!     .header("X-Client", "quadsweep")
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! let result = provider.execute(&query).await?;
//! ```

pub mod transport;
pub mod wire;

pub use transport::http::{HttpClientError, HttpSearchProvider, HttpSearchProviderBuilder};
pub use wire::{SearchBody, SearchResponse};
