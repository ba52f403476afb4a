// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Key functionality:
// - A `PageFetcher` trait: "give me the HTML at this URL, or an error"
// - `HttpFetcher`: the real implementation on top of reqwest
// - Detects the various failure modes (non-2xx, timeout, not HTML, etc.)
//
// The crawl engine only talks to the trait, so tests can swap in a fake
// fetcher that serves pages from memory.
// =============================================================================

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use std::time::Duration;

use crate::error::FetchError;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can turn a URL into an HTML body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url`. Non-success statuses are errors.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Settings for the HTTP client
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches pages with reqwest
///
/// Redirects follow reqwest's default policy.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, reqwest::Error> {
        // We'll reuse this client for all requests (connection pooling)
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        check_response(url, &response)?;

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

// Rejects responses we shouldn't extract links from
//
// - 2xx is required
// - if the server says what the content is, it has to be HTML
fn check_response(url: &str, response: &Response) -> Result<(), FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    match content_type {
        Some(content_type) if !is_html_content_type(content_type) => Err(FetchError::NotHtml {
            url: url.to_string(),
            content_type: content_type.to_string(),
        }),
        _ => Ok(()),
    }
}

// "text/html; charset=utf-8" -> true, "application/pdf" -> false
fn is_html_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case("text/html"))
        .unwrap_or(false)
}

// Categorizes the different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - Too many redirects
// - Connection refused / DNS failure
// - etc.
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_redirect() {
        FetchError::TooManyRedirects { url }
    } else if error.is_connect() {
        FetchError::Connect {
            url,
            message: error.to_string(),
        }
    } else if error.is_body() || error.is_decode() {
        FetchError::Body {
            url,
            message: error.to_string(),
        }
    } else {
        FetchError::Request {
            url,
            message: error.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling reqwest directly?
//    - The crawler only needs "URL in, HTML out"
//    - Tests implement the same trait with a fake website in memory,
//      so the crawl logic can be tested without a network
//
// 2. What does #[async_trait] do?
//    - Plain traits can't be used as `dyn PageFetcher` with async methods
//    - The macro rewrites each async fn to return a boxed future, which
//      makes `Arc<dyn PageFetcher>` possible
//
// 3. Why `Send + Sync` on the trait?
//    - The fetcher is shared by many tokio tasks, possibly on different threads
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("TEXT/HTML"));
        assert!(!is_html_content_type("application/json"));
        assert!(!is_html_content_type("text/plain; charset=utf-8"));
    }

    #[test]
    fn test_default_settings() {
        let settings = FetchSettings::default();
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert!(settings.user_agent.starts_with("site-crawler/"));
    }

    #[test]
    fn test_build_client() {
        assert!(HttpFetcher::new(&FetchSettings::default()).is_ok());
    }

    // Serves one canned HTTP response on a local port and returns its URL
    async fn serve_once(status_line: &'static str, content_type: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read until the end of the request headers
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/page", addr)
    }

    fn test_fetcher() -> HttpFetcher {
        HttpFetcher::new(&FetchSettings {
            timeout: Duration::from_secs(5),
            ..FetchSettings::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let url = serve_once("404 Not Found", "text/html", "gone").await;
        let result = test_fetcher().fetch_html(&url).await;
        assert!(
            matches!(result, Err(FetchError::Status { status: 404, .. })),
            "got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_non_html_is_rejected() {
        let url = serve_once("200 OK", "application/pdf", "%PDF-1.4").await;
        let result = test_fetcher().fetch_html(&url).await;
        match result {
            Err(FetchError::NotHtml { content_type, .. }) => assert_eq!(content_type, "application/pdf"),
            other => panic!("expected NotHtml, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_html_page_returns_body() {
        let url = serve_once("200 OK", "text/html; charset=utf-8", "<a href=\"/x\">hi</a>").await;
        let body = test_fetcher().fetch_html(&url).await.unwrap();
        assert_eq!(body, "<a href=\"/x\">hi</a>");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        // Port 9 (discard) on localhost is essentially never listening
        let fetcher = HttpFetcher::new(&FetchSettings {
            timeout: Duration::from_secs(2),
            ..FetchSettings::default()
        })
        .unwrap();
        let result = fetcher.fetch_html("http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }
}
