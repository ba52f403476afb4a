// src/crawl/registry.rs
// =============================================================================
// The visited registry: every page the crawler has discovered, with the
// number of internal links pointing at it.
//
// How it's used:
// - A worker calls record_visit(canonical_url) before fetching
// - The first call for a URL inserts it with count 1 and returns true:
//   that worker owns the page and is the only one that will fetch it
// - Every later call increments the count and returns false
//
// Entries are never removed. The lock is held only inside these methods,
// never across an .await.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    pages: Mutex<HashMap<String, usize>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Records one inbound link to `canonical_url`
    //
    // Returns: true if this is the first time the URL has been seen
    pub fn record_visit(&self, canonical_url: &str) -> bool {
        let mut pages = self.lock();
        match pages.get_mut(canonical_url) {
            Some(count) => {
                *count += 1;
                false
            }
            None => {
                pages.insert(canonical_url.to_string(), 1);
                true
            }
        }
    }

    pub fn size(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn inbound_count(&self, canonical_url: &str) -> Option<usize> {
        self.lock().get(canonical_url).copied()
    }

    // Copies out every (url, count) pair, sorted by count (highest first)
    // and then by URL
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut pages: Vec<(String, usize)> = self
            .lock()
            .iter()
            .map(|(url, count)| (url.clone(), *count))
            .collect();

        pages.sort_by(|(url_a, count_a), (url_b, count_b)| {
            count_b.cmp(count_a).then_with(|| url_a.cmp(url_b))
        });
        pages
    }

    // Every mutation is a single insert or increment, so a poisoned map is
    // still consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why std::sync::Mutex and not tokio's?
//    - The lock is never held across an .await, so the simpler (and faster)
//      standard mutex is enough
//
// 2. What is lock poisoning?
//    - If a thread panics while holding a std Mutex, the mutex is "poisoned"
//      and lock() returns an Err
//    - PoisonError::into_inner hands back the guard anyway
//
// 3. Why check-and-insert under one lock?
//    - Two workers discovering the same page at the same time must not both
//      see "first visit", or the page would be fetched twice
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_visit_then_repeat() {
        let registry = VisitedRegistry::new();
        assert!(registry.record_visit("https://a.test"));
        assert!(!registry.record_visit("https://a.test"));
        assert!(!registry.record_visit("https://a.test"));
        assert_eq!(registry.inbound_count("https://a.test"), Some(3));
        assert_eq!(registry.size(), 1);
    }

    #[test]
    fn test_unknown_url() {
        let registry = VisitedRegistry::new();
        assert_eq!(registry.inbound_count("https://a.test/nope"), None);
        assert_eq!(registry.size(), 0);
    }

    #[test]
    fn test_ranked_order() {
        let registry = VisitedRegistry::new();
        for url in ["https://a.test/b", "https://a.test/a", "https://a.test/c", "https://a.test/c"] {
            registry.record_visit(url);
        }

        assert_eq!(
            registry.ranked(),
            vec![
                ("https://a.test/c".to_string(), 2),
                ("https://a.test/a".to_string(), 1),
                ("https://a.test/b".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let registry = Arc::new(VisitedRegistry::new());
        registry.record_visit("https://a.test");

        let poisoner = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.pages.lock().unwrap();
            panic!("worker panicked while holding the lock");
        })
        .join();

        assert!(!registry.record_visit("https://a.test"));
        assert_eq!(registry.inbound_count("https://a.test"), Some(2));
    }

    #[test]
    fn test_exactly_one_first_visit_across_threads() {
        let registry = Arc::new(VisitedRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.record_visit("https://a.test/shared"))
            })
            .collect();

        let firsts = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|is_first| *is_first)
            .count();

        assert_eq!(firsts, 1);
        assert_eq!(registry.inbound_count("https://a.test/shared"), Some(8));
    }
}
