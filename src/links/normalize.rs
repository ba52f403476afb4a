// src/links/normalize.rs
// =============================================================================
// This module turns a raw URL into its canonical form.
//
// Two raw URLs are "the same page" if and only if they normalize to the same
// string, so this function is the identity key for the whole crawl.
//
// Rules (applied in order):
// 1. Parse the URL (reject anything that isn't an absolute URL with a host)
// 2. Lowercase scheme and host
// 3. Strip trailing '/' from the path (the root becomes the empty path)
// 4. Drop the default port (:80 for http, :443 for https)
// 5. Drop the fragment (#...)
// 6. Keep the query string as-is
//
// Example:
//   "HTTP://Example.COM:80/Docs/#intro" -> "http://example.com/Docs"
// =============================================================================

use url::Url;

use crate::error::UrlError;

// Normalizes a raw URL string into its canonical form
//
// Returns: Ok(canonical) or Err(UrlError) if the URL can't be parsed or has
// no host (like "mailto:someone@example.com")
pub fn normalize_url(raw_url: &str) -> Result<String, UrlError> {
    let parsed = Url::parse(raw_url).map_err(|source| UrlError::Parse {
        url: raw_url.to_string(),
        source,
    })?;

    let host = parsed
        .host_str()
        .ok_or_else(|| UrlError::MissingHost {
            url: raw_url.to_string(),
        })?
        .to_ascii_lowercase();

    // The url crate already lowercases the scheme, but only lowercases the
    // host for "special" schemes (http, https, ...)
    let scheme = parsed.scheme().to_ascii_lowercase();

    let mut canonical = format!("{}://{}", scheme, host);

    if let Some(port) = parsed.port() {
        if !is_default_port(&scheme, port) {
            canonical.push_str(&format!(":{}", port));
        }
    }

    canonical.push_str(parsed.path().trim_end_matches('/'));

    if let Some(query) = parsed.query() {
        canonical.push('?');
        canonical.push_str(query);
    }

    Ok(canonical)
}

fn is_default_port(scheme: &str, port: u16) -> bool {
    matches!((scheme, port), ("http", 80) | ("https", 443))
}
