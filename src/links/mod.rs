// src/links/mod.rs
// =============================================================================
// This module contains the pure URL logic of the crawler.
//
// Submodules:
// - normalize: Turns a raw URL into its canonical form (page identity)
// - html: Extracts <a href> links from HTML pages
// - origin: Decides whether a link stays on the crawled site
//
// None of these functions do I/O or keep state, so they're easy to test.
// =============================================================================

mod html;
mod normalize;
mod origin;

pub use html::extract_html_links;
pub use normalize::normalize_url;
pub use origin::is_same_origin;
