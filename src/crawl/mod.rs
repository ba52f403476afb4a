// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Concurrent crawling with a fixed number of fetches in flight
// - Respects same-host restriction (doesn't crawl external sites)
// - Every page is fetched at most once, however many pages link to it
// - Counts how many internal links point at each page
// - Soft page cap, optional depth limit, Ctrl-C cancellation
//
// Submodules:
// - config: The settings for one crawl
// - registry: The visited set with inbound-link counts
// - tracker: Knows when every worker has finished
// - worker: The crawl itself
// =============================================================================

mod config;
mod registry;
mod tracker;
mod worker;

pub use config::CrawlConfig;
pub use registry::VisitedRegistry;
pub use worker::Crawler;
