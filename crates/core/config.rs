//! Crawl configuration.
//!
//! Every knob the scheduler reads lives in [`CrawlConfig`]. It can be built in
//! code with the `with_*` setters or loaded from JSON (and TOML with the `toml`
//! feature). Loading validates; code-built configs are validated when the
//! scheduler is built.

use crate::error::{CrawlError, Result};
use serde::de::Error;

/// Traversal limits and provider constraints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlConfig {
    /// Deepest level that is still queried. The root is level 0.
    #[serde(default = "CrawlConfig::default_max_depth")]
    pub max_depth: u32,

    /// Cells per axis when a region is split.
    #[serde(default = "CrawlConfig::default_subdivision_factor")]
    pub subdivision_factor: usize,

    /// Largest result count the provider lets a single query page through.
    #[serde(default = "CrawlConfig::default_provider_cap")]
    pub provider_cap: u64,

    /// Worker count, i.e. the bound on in-flight provider calls.
    #[serde(default = "CrawlConfig::default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    #[serde(default = "CrawlConfig::default_page_size")]
    pub page_size: u32,
}

impl CrawlConfig {
    const fn default_max_depth() -> u32 {
        2
    }

    const fn default_subdivision_factor() -> usize {
        2
    }

    const fn default_provider_cap() -> u64 {
        1000
    }

    const fn default_max_concurrent_requests() -> usize {
        2
    }

    const fn default_page_size() -> u32 {
        1000
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_subdivision_factor(mut self, factor: usize) -> Self {
        self.subdivision_factor = factor;
        self
    }

    pub fn with_provider_cap(mut self, cap: u64) -> Self {
        self.provider_cap = cap;
        self
    }

    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.subdivision_factor < 2 {
            return Err(CrawlError::InvalidArgument(format!(
                "subdivision factor must be at least 2, got {}",
                self.subdivision_factor
            )));
        }
        if self.provider_cap == 0 {
            return Err(CrawlError::InvalidArgument(
                "provider cap must be greater than zero".to_string(),
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(CrawlError::InvalidArgument(
                "max concurrent requests must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(CrawlError::InvalidArgument(
                "page size must be greater than zero".to_string(),
            ));
        }

        if self.max_depth > 12 {
            log::warn!(
                "max depth {} allows up to {} provider calls",
                self.max_depth,
                self.max_provider_calls()
            );
        }

        Ok(())
    }

    /// Upper bound on partition probes for one run: a full tree of
    /// `factor^2`-way splits from level 0 through `max_depth`.
    pub fn max_provider_calls(&self) -> u128 {
        let fan_out = (self.subdivision_factor as u128).saturating_pow(2);
        (0..=self.max_depth).fold(0u128, |total, level| {
            total.saturating_add(fan_out.saturating_pow(level))
        })
    }

    /// Pages needed to enumerate `count` results of one accepted partition.
    pub fn pages_for(&self, count: u64) -> u32 {
        let reachable = count.min(self.provider_cap);
        let pages = reachable.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: CrawlConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: CrawlConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::default_max_depth(),
            subdivision_factor: Self::default_subdivision_factor(),
            provider_cap: Self::default_provider_cap(),
            max_concurrent_requests: Self::default_max_concurrent_requests(),
            page_size: Self::default_page_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.subdivision_factor, 2);
        assert_eq!(config.provider_cap, 1000);
        assert_eq!(config.max_concurrent_requests, 2);
        assert_eq!(config.page_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = CrawlConfig::default()
            .with_max_depth(4)
            .with_subdivision_factor(3)
            .with_max_concurrent_requests(8);

        let json = config.to_json().unwrap();
        let deserialized = CrawlConfig::from_json(&json).unwrap();

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = CrawlConfig::from_json(r#"{"max_depth": 5}"#).unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.provider_cap, 1000);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let invalid = [
            CrawlConfig::default().with_subdivision_factor(1),
            CrawlConfig::default().with_provider_cap(0),
            CrawlConfig::default().with_max_concurrent_requests(0),
            CrawlConfig::default().with_page_size(0),
        ];
        for config in invalid {
            assert!(matches!(
                config.validate(),
                Err(CrawlError::InvalidArgument(_))
            ));
        }

        assert!(CrawlConfig::from_json(r#"{"subdivision_factor": 0}"#).is_err());
        assert!(CrawlConfig::from_json(r#"{"unknown": 1}"#).is_err());
    }

    #[test]
    fn test_max_provider_calls() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_provider_calls(), 1 + 4 + 16);

        let config = CrawlConfig::default()
            .with_subdivision_factor(3)
            .with_max_depth(1);
        assert_eq!(config.max_provider_calls(), 1 + 9);

        let config = CrawlConfig::default().with_max_depth(0);
        assert_eq!(config.max_provider_calls(), 1);
    }

    #[test]
    fn test_pages_for() {
        let config = CrawlConfig::default().with_page_size(100);
        assert_eq!(config.pages_for(1), 1);
        assert_eq!(config.pages_for(100), 1);
        assert_eq!(config.pages_for(250), 3);
        assert_eq!(config.pages_for(1000), 10);
        // never more than the cap allows
        assert_eq!(config.pages_for(5000), 10);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml_roundtrip() {
        let config = CrawlConfig::default().with_max_depth(3);
        let toml_str = config.to_toml().unwrap();
        assert_eq!(CrawlConfig::from_toml(&toml_str).unwrap(), config);
    }
}
