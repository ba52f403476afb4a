// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   site-crawler <BASE_URL> <MAX_CONCURRENCY> <MAX_PAGES> [--max-depth N]
//                [--timeout SECS] [--json] [--verbose]
//
// clap takes care of the usage line, --help, and exiting with a non-zero
// code when an argument is missing or isn't a positive integer.
// =============================================================================

use clap::Parser;
use std::num::NonZeroUsize;

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawl one website and rank its pages by internal inbound links",
    long_about = "site-crawler follows <a href> links from BASE_URL, stays on the same host, \
                  and prints every page it found with the number of internal links pointing at it.\n\n\
                  Pages are identified by their normalized URL: scheme and host are lowercased, \
                  trailing slashes, default ports and #fragments are dropped, and the query string \
                  is kept. So http://A.test:80/docs/ and http://a.test/docs#intro are the same page."
)]
pub struct Cli {
    /// Website to crawl (e.g., https://example.com)
    pub base_url: String,

    /// Maximum number of pages fetched at the same time
    pub max_concurrency: NonZeroUsize,

    /// Stop discovering new pages once this many have been found
    ///
    /// This is a soft limit: pages already being processed still count,
    /// so the report can contain up to MAX_PAGES + MAX_CONCURRENCY - 1 pages.
    pub max_pages: NonZeroUsize,

    /// Maximum number of link hops from BASE_URL (default: unlimited)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Output the report in JSON format instead of text
    #[arg(long)]
    pub json: bool,

    /// Log crawl progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_positionals() {
        let cli = Cli::try_parse_from(["site-crawler", "https://a.test", "3", "25"]).unwrap();
        assert_eq!(cli.base_url, "https://a.test");
        assert_eq!(cli.max_concurrency.get(), 3);
        assert_eq!(cli.max_pages.get(), 25);
        assert_eq!(cli.max_depth, None);
        assert_eq!(cli.timeout, 10);
        assert!(!cli.json);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "site-crawler",
            "https://a.test",
            "1",
            "1",
            "--max-depth",
            "2",
            "--json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.max_depth, Some(2));
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_arguments() {
        assert!(Cli::try_parse_from(["site-crawler", "https://a.test", "3"]).is_err());
        assert!(Cli::try_parse_from(["site-crawler"]).is_err());
    }

    #[test]
    fn test_limits_must_be_positive_integers() {
        assert!(Cli::try_parse_from(["site-crawler", "https://a.test", "0", "5"]).is_err());
        assert!(Cli::try_parse_from(["site-crawler", "https://a.test", "2", "-1"]).is_err());
        assert!(Cli::try_parse_from(["site-crawler", "https://a.test", "two", "5"]).is_err());
    }
}
