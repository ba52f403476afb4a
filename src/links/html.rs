// src/links/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser)
// - Never fails: broken markup is repaired the way a browser would
//
// We also use the `url` crate to resolve relative links (like "/docs" or
// "../about") against a base URL.
//
// Every <a href> produces one output URL, in document order. Duplicates are
// kept on purpose: the crawler counts every link, not every distinct link.
// =============================================================================

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::UrlError;

// Extracts all links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL relative links are resolved against
//
// Returns: every <a href> as an absolute URL, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
//
// The only failure is an unparseable base URL. An href that can't be
// resolved is skipped.
pub fn extract_html_links(html: &str, base_url: &str) -> Result<Vec<String>, UrlError> {
    let base = Url::parse(base_url).map_err(|source| UrlError::Parse {
        url: base_url.to_string(),
        source,
    })?;

    let document = Html::parse_document(html);

    // descendants() walks the tree in pre-order, which is document order
    let links = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .flat_map(|element| {
            element
                .value()
                .attrs()
                .filter(|(name, _)| *name == "href")
                .map(|(_, href)| href)
                .collect::<Vec<_>>()
        })
        .filter_map(|href| resolve_url(&base, href))
        .collect();

    Ok(links)
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "another/path" -> Some("https://example.com/another/path")
//   href = "https://other.com/x" -> Some("https://other.com/x")
//   href = "http://[broken" -> None
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_and_relative_links() {
        let html = r#"
<html>
    <body>
        <a href="/path/one">
            <span>Boot.dev</span>
        </a>
        <a href="https://other.com/path/one">
            <span>Boot.dev</span>
        </a>
    </body>
</html>
"#;
        let links = extract_html_links(html, "https://blog.boot.dev").unwrap();
        assert_eq!(
            links,
            vec!["https://blog.boot.dev/path/one", "https://other.com/path/one"]
        );
    }

    #[test]
    fn test_relative_links_only() {
        let html = r#"
<html>
    <body>
        <a href="/relative/path"><span>Link</span></a>
        <a href="another/path"><span>Another Link</span></a>
    </body>
</html>
"#;
        let links = extract_html_links(html, "https://example.com").unwrap();
        assert_eq!(
            links,
            vec!["https://example.com/relative/path", "https://example.com/another/path"]
        );
    }

    #[test]
    fn test_absolute_link_only() {
        let html = r#"<a href="https://example.com/absolute/path">Absolute Link</a>"#;
        let links = extract_html_links(html, "https://example.com").unwrap();
        assert_eq!(links, vec!["https://example.com/absolute/path"]);
    }

    #[test]
    fn test_no_links() {
        let html = "<html><body><p>No links here!</p></body></html>";
        let links = extract_html_links(html, "https://example.com").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_not_a_url_is_relative() {
        let html = r#"<a href="not-a-url">Invalid URL</a>"#;
        let links = extract_html_links(html, "https://example.com").unwrap();
        assert_eq!(links, vec!["https://example.com/not-a-url"]);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let html = r#"<a href="/b">1</a><p><a href="/c">2</a></p><a href="/b">3</a>"#;
        let links = extract_html_links(html, "https://a.test").unwrap();
        assert_eq!(
            links,
            vec!["https://a.test/b", "https://a.test/c", "https://a.test/b"]
        );
    }

    #[test]
    fn test_unresolvable_href_is_skipped() {
        let html = r#"<a href="http://[::1">broken</a><a href="/ok">ok</a>"#;
        let links = extract_html_links(html, "https://example.com").unwrap();
        assert_eq!(links, vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let html = r#"<a name="top">Top</a><link href="/style.css">"#;
        let links = extract_html_links(html, "https://example.com").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let html = r#"<div><a href="/one">unclosed <a href="/two"></div"#;
        let links = extract_html_links(html, "https://example.com").unwrap();
        assert_eq!(
            links,
            vec!["https://example.com/one", "https://example.com/two"]
        );
    }

    #[test]
    fn test_invalid_base_url_fails() {
        let result = extract_html_links(r#"<a href="/x">x</a>"#, "not a base");
        assert!(matches!(result, Err(UrlError::Parse { .. })));
    }
}
