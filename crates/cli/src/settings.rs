//! Command-line arguments and configuration files.
//!
//! A config file (TOML, or JSON when the extension is `.json`) supplies the
//! baseline; any flag given on the command line overrides it.
//!
//! ```toml
//! [crawl]
//! max_depth = 3
//! max_concurrent_requests = 2
//!
//! [search]
//! endpoint = "https://search.example.com/api/homes/search"
//! region = { westLongitude = -83.741219, southLatitude = 41.522719, eastLongitude = -83.357890, northLatitude = 41.774026 }
//! output = "pages.jsonl"
//!
//! [search.filters]
//! home_statuses = ["fsba"]
//!
//! [search.headers]
//! X-Client = "quadsweep"
//! ```

use anyhow::{Context, bail};
use clap::Parser;
use quadsweep::{CrawlConfig, HomeStatus, Region, SearchFilters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("quadsweep/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TOML or JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Search endpoint URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Root region as west,south,east,north
    #[arg(long, value_name = "W,S,E,N", allow_hyphen_values = true)]
    pub bbox: Option<Region>,

    /// Listing status filter, repeatable (e.g. fsba, forRent)
    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<HomeStatus>,

    #[arg(long)]
    pub sort_order: Option<String>,

    #[arg(long)]
    pub listing_category: Option<String>,

    /// Extra request header, repeatable
    #[arg(long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    #[arg(long)]
    pub proxy: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// JSON-lines file receiving accepted pages; omit for a count-only run
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub max_depth: Option<u32>,

    #[arg(long)]
    pub subdivision_factor: Option<usize>,

    #[arg(long)]
    pub provider_cap: Option<u64>,

    /// Maximum concurrent requests
    #[arg(long)]
    pub concurrency: Option<usize>,

    #[arg(long)]
    pub page_size: Option<u32>,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {:?}", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// On-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub crawl: CrawlConfig,

    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSettings {
    pub endpoint: Option<String>,
    pub region: Option<Region>,
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub proxy: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output: Option<PathBuf>,
}

impl FileConfig {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?
        };
        Ok(config)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub crawl: CrawlConfig,
    pub endpoint: String,
    pub region: Region,
    pub filters: SearchFilters,
    pub headers: Vec<(String, String)>,
    pub proxy: Option<String>,
    pub timeout: Duration,
    pub output: Option<PathBuf>,
}

impl Settings {
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, args)
    }

    /// Overlay command-line flags on a file config.
    pub fn resolve(file: FileConfig, args: &Args) -> anyhow::Result<Self> {
        let FileConfig { mut crawl, search } = file;

        if let Some(depth) = args.max_depth {
            crawl = crawl.with_max_depth(depth);
        }
        if let Some(factor) = args.subdivision_factor {
            crawl = crawl.with_subdivision_factor(factor);
        }
        if let Some(cap) = args.provider_cap {
            crawl = crawl.with_provider_cap(cap);
        }
        if let Some(limit) = args.concurrency {
            crawl = crawl.with_max_concurrent_requests(limit);
        }
        if let Some(page_size) = args.page_size {
            crawl = crawl.with_page_size(page_size);
        }
        crawl.validate()?;

        let Some(endpoint) = args.endpoint.clone().or(search.endpoint) else {
            bail!("no search endpoint: pass --endpoint or set search.endpoint");
        };
        let Some(region) = args.bbox.or(search.region) else {
            bail!("no region: pass --bbox or set search.region");
        };

        let mut filters = search.filters;
        if !args.statuses.is_empty() {
            filters.home_statuses = args.statuses.clone();
        }
        if let Some(sort_order) = &args.sort_order {
            filters.sort_order = sort_order.clone();
        }
        if let Some(category) = &args.listing_category {
            filters.listing_category = category.clone();
        }

        let mut headers = search.headers;
        for (name, value) in &args.headers {
            headers.insert(name.clone(), value.clone());
        }
        if !headers.keys().any(|name| name.eq_ignore_ascii_case("user-agent")) {
            headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
        }

        let timeout_secs = args
            .timeout_secs
            .or(search.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            crawl,
            endpoint,
            region,
            filters,
            headers: headers.into_iter().collect(),
            proxy: args.proxy.clone().or(search.proxy),
            timeout: Duration::from_secs(timeout_secs),
            output: args.output.clone().or(search.output),
        })
    }
}
