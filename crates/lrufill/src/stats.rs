//! Cache statistics tracking

/// Hit, miss and eviction counters for one cache instance.
///
/// Counters start at zero when the cache is built and only ever grow.
/// [`LruCache::stats`](crate::LruCache::stats) hands out a copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheStats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Requests served from a resident entry
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Requests filled from the value source
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Entries dropped to stay within capacity
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Successful requests, hits plus misses
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
