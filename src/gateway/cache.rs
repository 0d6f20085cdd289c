use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;

/// One cached entry. `fetched_at: None` means never fetched.
#[derive(Debug)]
struct Slot<T> {
    fetched_at: Option<Instant>,
    value: Option<T>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            fetched_at: None,
            value: None,
        }
    }
}

/// Keyed TTL cache with single-flight fetches.
///
/// Each key owns an async-mutexed slot, so concurrent callers for the same
/// key serialize on the slot and at most one fetch runs per key per freshness
/// window. Unavailable results (`None`) are cached for the full TTL the same
/// as values, so a failing provider is not hammered until the window expires.
pub struct TtlCache<T> {
    ttl: Duration,
    slots: DashMap<String, Arc<Mutex<Slot<T>>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: DashMap::new(),
        }
    }

    /// Return the cached value for `key` if still fresh, otherwise run
    /// `fetch`, store its result, and return it.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Option<T>>,
    {
        // Clone the slot handle out of the map first; the shard guard must
        // not be held across an await point.
        let slot = {
            let entry = self.slots.entry(key.to_string()).or_default();
            Arc::clone(entry.value())
        };

        let mut slot = slot.lock().await;
        if let Some(fetched_at) = slot.fetched_at {
            if fetched_at.elapsed() < self.ttl {
                return slot.value.clone();
            }
        }

        slot.value = fetch().await;
        slot.fetched_at = Some(Instant::now());
        slot.value.clone()
    }

    /// Number of keys ever touched (fresh or stale).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn serves_cached_value_within_ttl() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let fetches = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch("AAPL", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Some(7)
            })
            .await;
        let second = cache
            .get_or_fetch("AAPL", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Some(8)
            })
            .await;

        assert_eq!(first, Some(7));
        assert_eq!(second, Some(7));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refetches_after_ttl_expires() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(20));
        let fetches = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch("AAPL", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Some(1)
            })
            .await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        let second = cache
            .get_or_fetch("AAPL", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Some(2)
            })
            .await;

        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unavailable_result_is_cached_too() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let fetches = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch("AAPL", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                None
            })
            .await;
        let second = cache
            .get_or_fetch("AAPL", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Some(9)
            })
            .await;

        assert_eq!(first, None);
        assert_eq!(second, None);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let cache: Arc<TtlCache<u32>> = Arc::new(TtlCache::new(Duration::from_secs(60)));
        let fetches = Arc::new(AtomicUsize::new(0));

        let slow_fetch = |counter: Arc<AtomicUsize>| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            Some(1u32)
        };

        let (a, b) = tokio::join!(
            cache.get_or_fetch("QQQ", || slow_fetch(Arc::clone(&fetches))),
            cache.get_or_fetch("QQQ", || slow_fetch(Arc::clone(&fetches))),
        );

        assert_eq!(a, Some(1));
        assert_eq!(b, Some(1));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_keys_fetch_independently() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        let fetches = AtomicUsize::new(0);

        cache
            .get_or_fetch("AAPL", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Some(1)
            })
            .await;
        cache
            .get_or_fetch("MSFT", || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Some(2)
            })
            .await;

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }
}
