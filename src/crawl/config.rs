// src/crawl/config.rs
// =============================================================================
// The settings for one crawl.
//
// A CrawlConfig is built once (from the command line) and then shared,
// read-only, by every worker.
// =============================================================================

use std::num::NonZeroUsize;
use url::Url;

use crate::error::{ConfigError, UrlError};

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The seed exactly as the user typed it
    pub seed: String,
    /// Parsed seed. Its host is the crawl scope and relative links resolve against it.
    pub base_url: Url,
    /// How many pages may be fetched at the same time
    pub max_concurrency: NonZeroUsize,
    /// Soft upper bound on distinct pages recorded
    pub max_pages: NonZeroUsize,
    /// Maximum link hops from the seed (None = unlimited)
    pub max_depth: Option<usize>,
}

impl CrawlConfig {
    // Validates and builds a config
    //
    // Fails if the seed isn't an absolute URL with a host, or if either limit is 0
    pub fn new(seed: &str, max_concurrency: usize, max_pages: usize) -> Result<Self, ConfigError> {
        let base_url = Url::parse(seed).map_err(|source| ConfigError::InvalidBaseUrl {
            url: seed.to_string(),
            source: UrlError::Parse {
                url: seed.to_string(),
                source,
            },
        })?;

        if base_url.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl {
                url: seed.to_string(),
                source: UrlError::MissingHost {
                    url: seed.to_string(),
                },
            });
        }

        Ok(Self {
            seed: seed.to_string(),
            base_url,
            max_concurrency: NonZeroUsize::new(max_concurrency).ok_or(ConfigError::ZeroConcurrency)?,
            max_pages: NonZeroUsize::new(max_pages).ok_or(ConfigError::ZeroPages)?,
            max_depth: None,
        })
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
