// src/report.rs
// =============================================================================
// Turns the crawl results into the report printed on stdout.
//
// Two formats:
// - text (default):
//     =============================
//       REPORT for https://a.test
//     =============================
//     Found 2 internal links to https://a.test
//     ...
// - JSON (--json): the same data, for scripts
//
// Pages are sorted by inbound links (most first), ties by URL.
// =============================================================================

use serde::Serialize;

use crate::crawl::VisitedRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCount {
    pub url: String,
    pub inbound_links: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub base_url: String,
    pub pages: Vec<PageCount>,
}

impl CrawlReport {
    pub fn new(base_url: &str, registry: &VisitedRegistry) -> Self {
        let pages = registry
            .ranked()
            .into_iter()
            .map(|(url, inbound_links)| PageCount { url, inbound_links })
            .collect();

        Self {
            base_url: base_url.to_string(),
            pages,
        }
    }

    pub fn to_text(&self) -> String {
        let rule = "=".repeat(29);

        let mut lines = vec![
            rule.clone(),
            format!("  REPORT for {}", self.base_url),
            rule,
        ];
        lines.extend(
            self.pages
                .iter()
                .map(|page| format!("Found {} internal links to {}", page.inbound_links, page.url)),
        );

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
