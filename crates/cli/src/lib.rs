//! quadsweep command-line crawler
//!
//! Wires the HTTP search provider, a sink and the partition scheduler together
//! from [`Settings`].
//!
//! # Example
//!
//! ```ignore
//! use quadsweep_cli::{Settings, run};
//!
//! let settings = Settings::load(&args)?;
//! let summary = run(&settings, CancellationToken::new()).await?;
//! ```

pub mod settings;

pub use settings::{Args, FileConfig, SearchSettings, Settings};

use quadsweep::{
    CancellationToken, JsonLinesSink, NullSink, PartitionScheduler, Query, RunSummary, Sink,
};
use quadsweep_client::HttpSearchProvider;
use std::sync::Arc;
use tracing::{info, warn};

/// Crawl the configured region once. Cancelling `stop` ends the run early
/// after in-flight requests complete.
pub async fn run(settings: &Settings, stop: CancellationToken) -> anyhow::Result<RunSummary> {
    let mut provider = HttpSearchProvider::builder(&settings.endpoint).timeout(settings.timeout);
    for (name, value) in &settings.headers {
        provider = provider.header(name, value);
    }
    if let Some(proxy) = &settings.proxy {
        info!("Routing requests through proxy");
        provider = provider.proxy(proxy);
    }
    let provider = provider.build()?;

    let sink: Arc<dyn Sink> = match &settings.output {
        Some(path) => Arc::new(JsonLinesSink::open(path).await?),
        None => {
            warn!("No output file configured, accepted pages will only be counted");
            Arc::new(NullSink)
        }
    };

    let scheduler = PartitionScheduler::builder()
        .provider(Arc::new(provider))
        .sink(sink)
        .config(settings.crawl.clone())
        .build()?;

    let root = Query::new(settings.region, settings.filters.clone());
    Ok(scheduler.run_until(root, stop).await)
}
