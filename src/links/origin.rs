// src/links/origin.rs
// =============================================================================
// Decides whether a discovered link belongs to the site being crawled.
//
// Two URLs are on the same site when both parse and their hosts are equal.
// Scheme and port are ignored, so http://a.test and https://a.test:8443 are
// the same site. Hosts are compared exactly: "www.a.test" is NOT "a.test".
// =============================================================================

use url::Url;

// Returns true if `current_url` is on the same host as `base_url`
pub fn is_same_origin(base_url: &str, current_url: &str) -> bool {
    let (Ok(base), Ok(current)) = (Url::parse(base_url), Url::parse(current_url)) else {
        return false;
    };

    match (base.host_str(), current.host_str()) {
        (Some(base_host), Some(current_host)) => base_host == current_host,
        // mailto:, data:, etc. have no host and are never part of the site
        _ => false,
    }
}
