//! HTTP transport for the search provider
//!
//! Every query is sent as its own JSON POST; the response's total count and
//! list results are mapped onto a [`SearchResult`].
//!
//! # Example
//!
//! ```ignore
//! use quadsweep_client::transport::http::HttpSearchProvider;
//!
//! let provider = HttpSearchProvider::builder("http://localhost:8080/search")
//!     .proxy("http://proxy.internal:3128")
//!     .build()?;
//! ```

use crate::wire::{SearchBody, SearchResponse};
use async_trait::async_trait;
use quadsweep::{CrawlError, SearchProvider, SearchResult};
use quadsweep_types::Query;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for building an HTTP provider
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Invalid endpoint {0:?}: {1}")]
    Endpoint(String, String),
    #[error("Invalid header {0:?}: {1}")]
    Header(String, String),
    #[error("Invalid proxy {0:?}: {1}")]
    Proxy(String, String),
    #[error("HTTP client setup failed: {0}")]
    Build(#[from] reqwest::Error),
}

impl From<HttpClientError> for CrawlError {
    fn from(err: HttpClientError) -> Self {
        CrawlError::InvalidArgument(err.to_string())
    }
}

/// Builder for [`HttpSearchProvider`].
#[derive(Debug, Clone)]
pub struct HttpSearchProviderBuilder {
    endpoint: String,
    headers: Vec<(String, String)>,
    proxy: Option<String>,
    timeout: Duration,
}

impl HttpSearchProviderBuilder {
    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Route all requests through a proxy.
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Per-request timeout. Expired requests surface as network errors.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpSearchProvider, HttpClientError> {
        let endpoint = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| HttpClientError::Endpoint(self.endpoint.clone(), e.to_string()))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HttpClientError::Header(name.clone(), e.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| HttpClientError::Header(name.clone(), e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        let mut client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout);
        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| HttpClientError::Proxy(proxy.clone(), e.to_string()))?;
            client = client.proxy(proxy);
        }

        Ok(HttpSearchProvider {
            client: client.build()?,
            endpoint,
        })
    }
}

/// Search provider speaking JSON over HTTP POST.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpSearchProvider {
    pub fn builder(endpoint: impl Into<String>) -> HttpSearchProviderBuilder {
        HttpSearchProviderBuilder {
            endpoint: endpoint.into(),
            headers: Vec::new(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn execute(&self, query: &Query) -> quadsweep::Result<SearchResult> {
        let body = SearchBody::from_query(query);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = format!("{} answered {}", self.endpoint, status);
            return Err(if is_transient(status) {
                CrawlError::Network(message)
            } else {
                CrawlError::Provider(message)
            });
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        let parsed: SearchResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CrawlError::Provider(format!("unexpected response shape: {}", e)))?;

        log::debug!(
            "{} page {} -> {} matches",
            query.region(),
            query.paging().page_number,
            parsed.search_result_counts.total_matching_count
        );
        Ok(parsed.into())
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
}

fn request_error(err: reqwest::Error) -> CrawlError {
    if err.is_builder() {
        CrawlError::Provider(err.to_string())
    } else {
        CrawlError::Network(err.to_string())
    }
}
