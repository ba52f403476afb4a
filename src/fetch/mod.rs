// src/fetch/mod.rs
// =============================================================================
// This module is the crawler's HTTP layer.
//
// Submodules:
// - http: The PageFetcher trait and its reqwest implementation
// =============================================================================

mod http;

pub use http::{FetchSettings, HttpFetcher, PageFetcher};
