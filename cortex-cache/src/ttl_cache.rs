use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::stats::{CacheStats, CacheStatsCounters};

/// A generic TTL-and-capacity-bounded cache with stats, used for both the
/// memory cache and the query cache (spec.md §4.2) and the embedder's
/// query-embedding cache (§4.6).
///
/// Wraps `moka::sync::Cache`; `time_to_live` is the absolute TTL the spec
/// enumerates (`cache.memory.ttlMs`, `cache.query.ttlMs`, ...). Eviction by
/// either capacity or TTL is counted identically as an "eviction" in the
/// stats snapshot.
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
    stats: Arc<CacheStatsCounters>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let stats = Arc::new(CacheStatsCounters::default());
        let eviction_stats = stats.clone();
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .eviction_listener(move |_k, _v, _cause| {
                eviction_stats.record_eviction();
            })
            .build();
        Self { inner, stats }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        match self.inner.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.stats.record_insertion();
        self.inner.insert(key, value);
    }

    pub fn invalidate(&self, key: &K) {
        self.inner.invalidate(key);
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    pub fn len(&self) -> u64 {
        self.inner.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Runs moka's pending maintenance tasks (invalidations, evictions)
    /// synchronously. Useful in tests that assert on `len()`/`stats()`
    /// immediately after an operation.
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_is_a_hit() {
        let cache: TtlCache<String, i32> = TtlCache::new(100, Duration::from_secs(60));
        cache.insert("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn miss_is_counted() {
        let cache: TtlCache<String, i32> = TtlCache::new(100, Duration::from_secs(60));
        assert_eq!(cache.get(&"missing".to_string()), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache: TtlCache<String, i32> = TtlCache::new(100, Duration::from_secs(60));
        cache.insert("a".to_string(), 1);
        cache.invalidate(&"a".to_string());
        cache.run_pending_tasks();
        assert_eq!(cache.get(&"a".to_string()), None);
    }

    #[test]
    fn capacity_eviction_is_counted() {
        let cache: TtlCache<i32, i32> = TtlCache::new(2, Duration::from_secs(60));
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);
        cache.run_pending_tasks();
        assert!(cache.len() <= 2);
    }
}
