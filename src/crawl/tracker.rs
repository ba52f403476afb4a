// src/crawl/tracker.rs
// =============================================================================
// Tracks how many crawl workers are still pending.
//
// The crawl has no queue to watch, so "done" means: every worker that was
// ever scheduled has exited. The count goes up *before* a worker is spawned
// and down when its PendingGuard is dropped, so it can't reach zero while a
// parent is still spawning children.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct LifecycleTracker {
    pending: AtomicUsize,
    drained: Notify,
}

impl LifecycleTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // Registers one pending worker. The worker must eventually drop the
    // returned guard.
    pub fn register(self: &Arc<Self>) -> PendingGuard {
        self.pending.fetch_add(1, Ordering::SeqCst);
        PendingGuard {
            tracker: Arc::clone(self),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    // Waits until the pending count is zero
    pub async fn wait_until_drained(&self) {
        loop {
            let notified = self.drained.notified();
            tokio::pin!(notified);
            // Register interest before checking, so a drain that happens
            // between the check and the await isn't missed
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn complete_one(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.drained.notify_waiters();
        }
    }
}

/// Marks one worker as finished when dropped
#[derive(Debug)]
pub struct PendingGuard {
    tracker: Arc<LifecycleTracker>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.tracker.complete_one();
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Notify?
//    - A way for one task to wake up others that are waiting
//    - notify_waiters() only wakes tasks that are *already* registered
//
// 2. Why call enable() before checking the count?
//    - Without it, the last worker could finish between our check and our
//      .await, and we would wait forever for a wake-up that already happened
//    - enable() registers us first, so that wake-up can't be missed
//
// 3. Why is the counter decremented in Drop?
//    - Drop runs on every exit path, early returns and panics included
// -----------------------------------------------------------------------------
