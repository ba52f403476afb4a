// src/error.rs
// =============================================================================
// Error types used by the crawl engine.
//
// There are three families of errors:
// - UrlError: a URL could not be parsed or has no host
// - FetchError: a page could not be downloaded as HTML
// - ConfigError: the crawl settings given on the command line are invalid
//
// Only ConfigError is fatal. The other two are per-URL / per-page problems:
// the worker that hits them logs the error and stops, the crawl continues.
//
// We use `thiserror` to derive Display and Error for these enums, and keep
// `anyhow` for the application glue in main.rs.
// =============================================================================

use thiserror::Error;

/// Problems turning a raw string into a usable URL
#[derive(Debug, Error)]
pub enum UrlError {
    /// The string is not an absolute URL
    #[error("invalid URL '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but has no host (mailto:, data:, ...)
    #[error("URL has no host: {url}")]
    MissingHost { url: String },
}

/// Reasons a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("too many redirects fetching {url}")]
    TooManyRedirects { url: String },

    #[error("connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    /// Any non-2xx response
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not HTML (content-type: {content_type})")]
    NotHtml { url: String, content_type: String },

    #[error("failed to read body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

/// Invalid crawl settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: UrlError,
    },

    #[error("max concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("max pages must be at least 1")]
    ZeroPages,
}
