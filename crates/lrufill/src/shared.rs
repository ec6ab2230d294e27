//! SharedCache: LruCache behind a mutex for use across threads

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::LruCache;
use crate::error::Result;
use crate::source::ValueSource;
use crate::stats::CacheStats;

/// Thread-safe handle to an [`LruCache`]
///
/// Each [`get`](Self::get) runs under one exclusive lock, value-source call
/// included, so the capacity + 1 entries a miss holds before evicting are
/// never visible to another thread. Clones share the same cache.
pub struct SharedCache<K, V, S> {
    inner: Arc<Mutex<LruCache<K, V, S>>>,
}

impl<K, V, S> SharedCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: ValueSource<K, V>,
{
    /// Create a shared cache holding at most `capacity` entries
    pub fn new(capacity: usize, source: S) -> Result<Self> {
        Ok(Self::from_cache(LruCache::new(capacity, source)?))
    }

    /// Share an existing cache
    pub fn from_cache(cache: LruCache<K, V, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Get a copy of the value for `key`, fetching it on a miss
    pub fn get(&self, key: &K) -> std::result::Result<V, S::Error>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Number of misses since construction
    pub fn miss_count(&self) -> u64 {
        self.inner.lock().miss_count()
    }

    /// Copy of the current counters
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if no entry is resident
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Run `f` against the cache while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&LruCache<K, V, S>) -> R) -> R {
        let cache = self.inner.lock();
        f(&cache)
    }
}

impl<K, V, S> Clone for SharedCache<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::{from_fn, try_from_fn};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let cache = SharedCache::new(2, from_fn(|k: &u64| k * 3)).unwrap();

        assert_eq!(cache.get(&2), Ok(6));
        assert_eq!(cache.get(&2), Ok(6));
        assert_eq!(cache.miss_count(), 1);
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn test_shared_rejects_zero_capacity() {
        let result = SharedCache::<u64, u64, _>::new(0, from_fn(|k: &u64| *k));
        assert!(matches!(result, Err(Error::InvalidCapacity(0))));
    }

    #[test]
    fn test_shared_propagates_source_error() {
        let cache = SharedCache::new(2, try_from_fn(|_: &u64| Err::<u64, _>("offline"))).unwrap();
        assert_eq!(cache.get(&1), Err("offline"));
        assert_eq!(cache.miss_count(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_threads_fetch_each_key_once() {
        let fetches = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&fetches);
        let cache = SharedCache::new(
            16,
            from_fn(move |k: &u64| {
                counter.fetch_add(1, Ordering::Relaxed);
                k + 100
            }),
        )
        .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for k in 0..10u64 {
                        assert_eq!(cache.get(&k), Ok(k + 100));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(fetches.load(Ordering::Relaxed), 10);
        assert_eq!(cache.miss_count(), 10);
        assert_eq!(cache.stats().hits(), 30);
        cache.with(|inner| inner.check_invariants()).unwrap();
    }

    #[test]
    fn test_threads_respect_capacity() {
        let cache = SharedCache::new(4, from_fn(|k: &u64| *k)).unwrap();

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for k in 0..50u64 {
                        let key = (k * 7 + t) % 13;
                        assert_eq!(cache.get(&key), Ok(key));
                        assert!(cache.len() <= 4);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.stats().requests(), 200);
        cache.with(|inner| inner.check_invariants()).unwrap();
    }
}
