// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only has the report)
// 3. Run the crawl until every worker is done (or Ctrl-C is pressed)
// 4. Print the report
// 5. Exit with proper code (0 = crawl finished, 2 = bad arguments / setup error)
//
// Per-page errors (404s, timeouts, ...) don't change the exit code: they're
// logged and the crawl carries on.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;     // src/cli.rs - command-line parsing
mod crawl;   // src/crawl/ - the concurrent crawl engine
mod error;   // src/error.rs - typed errors
mod fetch;   // src/fetch/ - HTTP layer
mod links;   // src/links/ - URL normalization and link extraction
mod report;  // src/report.rs - report formatting

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use crawl::{CrawlConfig, Crawler};
use fetch::{FetchSettings, HttpFetcher, PageFetcher};
use report::CrawlReport;

#[tokio::main]
async fn main() {
    // Parse first: on bad arguments clap prints usage and exits non-zero
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins if set; otherwise warnings only, or debug with --verbose
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("site_crawler=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = CrawlConfig::new(&cli.base_url, cli.max_concurrency.get(), cli.max_pages.get())?
        .with_max_depth(cli.max_depth);

    let settings = FetchSettings {
        timeout: Duration::from_secs(cli.timeout),
        ..FetchSettings::default()
    };
    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpFetcher::new(&settings).context("failed to create HTTP client")?);

    // Ctrl-C stops the crawl; whatever was found so far is still reported
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, finishing with the pages found so far");
                cancel.cancel();
            }
        });
    }

    let crawler = Crawler::with_cancellation(config, fetcher, cancel);
    let summary = crawler.run().await;
    if summary.fetch_failures > 0 {
        warn!(
            found = summary.pages_recorded,
            fetched = summary.pages_fetched,
            failed = summary.fetch_failures,
            "some pages could not be fetched"
        );
    }

    let report = CrawlReport::new(&crawler.config().seed, crawler.registry());
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    Ok(0)
}
