// src/crawl/worker.rs
// =============================================================================
// This module implements the concurrent crawl.
//
// How it works:
// 1. The seed URL gets a worker (a tokio task)
// 2. Each worker waits for a permit from the fetch gate (a semaphore), so at
//    most `max_concurrency` workers are past this point at once
// 3. It stops early if the registry already holds `max_pages` pages, if the
//    URL is too deep, or if the URL can't be normalized
// 4. It records the visit. If another worker already owns this page, it stops
//    here; this is what keeps every page to a single fetch
// 5. It fetches the page, extracts every <a href> and spawns a new worker for
//    each link on the same host (except a link back to itself)
//
// There is no queue. The crawl is finished when the lifecycle tracker says
// every spawned worker has exited.
//
// The page cap is soft: workers already past the gate when the cap is hit
// can still record their page, so the registry may end up with up to
// `max_pages + max_concurrency - 1` entries.
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::CrawlConfig;
use super::registry::VisitedRegistry;
use super::tracker::{LifecycleTracker, PendingGuard};
use crate::fetch::PageFetcher;
use crate::links::{extract_html_links, is_same_origin, normalize_url};

/// Counters for one finished crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrawlSummary {
    /// Distinct pages in the registry
    pub pages_recorded: usize,
    /// Pages whose HTML was downloaded successfully
    pub pages_fetched: usize,
    /// Pages that were recorded but failed to download
    pub fetch_failures: usize,
}

pub struct Crawler {
    config: CrawlConfig,
    fetcher: Arc<dyn PageFetcher>,
    registry: VisitedRegistry,
    gate: Arc<Semaphore>,
    tracker: Arc<LifecycleTracker>,
    cancel: CancellationToken,
    pages_fetched: AtomicUsize,
    fetch_failures: AtomicUsize,
}

impl Crawler {
    // The crawl stops early once `cancel` is triggered. Pages recorded up
    // to that point stay in the registry.
    pub fn with_cancellation(
        config: CrawlConfig,
        fetcher: Arc<dyn PageFetcher>,
        cancel: CancellationToken,
    ) -> Arc<Self> {
        let gate = Arc::new(Semaphore::new(config.max_concurrency.get()));

        Arc::new(Self {
            config,
            fetcher,
            registry: VisitedRegistry::new(),
            gate,
            tracker: LifecycleTracker::new(),
            cancel,
            pages_fetched: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn registry(&self) -> &VisitedRegistry {
        &self.registry
    }

    // Crawls from the seed URL and returns once every worker has exited
    pub async fn run(self: &Arc<Self>) -> CrawlSummary {
        info!(
            seed = %self.config.seed,
            max_concurrency = self.config.max_concurrency.get(),
            max_pages = self.config.max_pages.get(),
            "starting crawl"
        );

        self.spawn_worker(self.config.seed.clone(), 0);
        self.tracker.wait_until_drained().await;

        let summary = CrawlSummary {
            pages_recorded: self.registry.size(),
            pages_fetched: self.pages_fetched.load(Ordering::SeqCst),
            fetch_failures: self.fetch_failures.load(Ordering::SeqCst),
        };
        info!(?summary, cancelled = self.cancel.is_cancelled(), "crawl complete");
        summary
    }

    // Registers a pending worker, then spawns it
    //
    // Registering first means the tracker can't drain between this call and
    // the worker starting.
    fn spawn_worker(self: &Arc<Self>, raw_url: String, depth: usize) {
        let pending = self.tracker.register();
        tokio::spawn(Arc::clone(self).visit(raw_url, depth, pending));
    }

    // One worker: visits a single raw URL
    //
    // Returns a boxed future because it spawns more of itself.
    fn visit(self: Arc<Self>, raw_url: String, depth: usize, pending: PendingGuard) -> BoxFuture<'static, ()> {
        async move {
            // Dropped on every return below: releases the permit, then
            // marks this worker as finished
            let _pending = pending;

            let _permit = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return,
                permit = Arc::clone(&self.gate).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return,
                },
            };

            if self.registry.size() >= self.config.max_pages.get() {
                debug!(url = %raw_url, "page cap reached, skipping");
                return;
            }

            if let Some(max_depth) = self.config.max_depth {
                if depth > max_depth {
                    debug!(url = %raw_url, depth, "depth limit reached, skipping");
                    return;
                }
            }

            let canonical = match normalize_url(&raw_url) {
                Ok(canonical) => canonical,
                Err(e) => {
                    debug!(url = %raw_url, error = %e, "skipping unnormalizable URL");
                    return;
                }
            };

            if !self.registry.record_visit(&canonical) {
                debug!(url = %canonical, "already visited");
                return;
            }

            debug!(url = %raw_url, depth, "fetching");

            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return,
                fetched = self.fetcher.fetch_html(&raw_url) => fetched,
            };

            // The page stays in the registry even if the fetch fails: it is
            // still linked to
            let html = match fetched {
                Ok(html) => {
                    self.pages_fetched.fetch_add(1, Ordering::SeqCst);
                    html
                }
                Err(e) => {
                    self.fetch_failures.fetch_add(1, Ordering::SeqCst);
                    warn!(url = %raw_url, error = %e, "fetch failed");
                    return;
                }
            };

            // Links resolve against the seed, not the current page
            let base = self.config.base_url.as_str();
            let links = match extract_html_links(&html, base) {
                Ok(links) => links,
                Err(e) => {
                    warn!(url = %raw_url, error = %e, "link extraction failed");
                    return;
                }
            };

            debug!(url = %raw_url, found = links.len(), "extracted links");

            for link in links {
                if is_same_origin(base, &link) && link != raw_url {
                    self.spawn_worker(link, depth + 1);
                }
            }
        }
        .boxed()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does visit() return BoxFuture instead of being an async fn?
//    - visit() spawns more visit() tasks
//    - An async fn that (indirectly) contains itself would have an
//      infinitely sized future type
//    - Boxing gives the future a fixed size: a pointer
//
// 2. What is a semaphore?
//    - A counter of "permits". acquire_owned() waits until one is free
//    - The permit is given back when it's dropped
//    - With N permits, at most N workers can be fetching at once
//
// 3. What does tokio::select! with `biased;` do?
//    - Waits on several futures and runs the branch of the first to finish
//    - `biased` checks them top to bottom, so cancellation always wins a tie
//
// 4. Why is nothing released by hand?
//    - `_permit` and `_pending` are dropped when the task returns, on every
//      path, in reverse order of creation
//    - So the permit goes back before the worker counts as finished
// -----------------------------------------------------------------------------
