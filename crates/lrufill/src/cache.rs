//! LruCache: get-or-fetch cache with least-recently-used eviction

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::RecencyIndex;
use crate::list::{Handle, RecencyList};
use crate::source::ValueSource;
use crate::stats::CacheStats;

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 4096;

/// Fixed-capacity cache that fills misses from a [`ValueSource`]
///
/// Every successful [`get`](Self::get) makes its key the most recently used.
/// A miss that pushes the cache past capacity evicts the least recently used
/// entry after the new one is inserted.
///
/// ```
/// use lrufill::{from_fn, LruCache};
///
/// let mut cache = LruCache::new(2, from_fn(|k: &u32| k.to_string())).unwrap();
/// cache.get_infallible(&1);
/// cache.get_infallible(&2);
/// cache.get_infallible(&1); // hit, 1 is now most recent
/// cache.get_infallible(&3); // evicts 2
///
/// assert_eq!(cache.miss_count(), 3);
/// assert!(!cache.contains(&2));
/// ```
pub struct LruCache<K, V, S> {
    /// Key -> handle lookup
    index: RecencyIndex<K>,

    /// Entry storage, most recent first
    list: RecencyList<K, V>,

    /// Consulted on every miss
    source: S,

    stats: CacheStats,

    capacity: usize,
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: ValueSource<K, V>,
{
    /// Create an empty cache holding at most `capacity` entries
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries, at least 1
    /// * `source` - Value source consulted on a miss
    ///
    /// # Returns
    /// * `Result<LruCache>` - `Error::InvalidCapacity` when `capacity` is 0
    pub fn new(capacity: usize, source: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        debug!(capacity, "creating lru cache");

        // A miss holds one entry over capacity until it evicts.
        let reserve = capacity.saturating_add(1).min(PREALLOC_LIMIT);

        Ok(Self {
            index: RecencyIndex::with_capacity(reserve),
            list: RecencyList::with_capacity(reserve),
            source,
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Get the value for `key`, fetching it on a miss
    ///
    /// A hit moves the entry to the most recently used position and never
    /// calls the value source. A miss calls the source once; if it fails the
    /// error is returned as-is and the cache is left untouched.
    pub fn get(&mut self, key: &K) -> std::result::Result<&V, S::Error> {
        let handle = match self.index.lookup(key) {
            Some(handle) => {
                self.list.move_to_front(handle);
                self.stats.record_hit();
                trace!(hits = self.stats.hits(), "cache hit");
                handle
            }
            None => self.fill(key)?,
        };

        Ok(self.list[handle].value())
    }

    /// Number of misses since construction
    pub fn miss_count(&self) -> u64 {
        self.stats.misses()
    }

    /// Copy of the current counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if no entry is resident
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check residency without touching recency order or counters
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Read a resident value without touching recency order or counters
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index
            .lookup(key)
            .and_then(|handle| self.list.get(handle))
            .map(|entry| entry.value())
    }

    /// Resident entries, most recently used first
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter().map(|entry| (entry.key(), entry.value()))
    }

    /// Resident keys, most recently used first
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|entry| entry.key())
    }

    /// Borrow the value source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop the cache and return its value source
    pub fn into_source(self) -> S {
        self.source
    }

    /// Verify that the index and the recency list describe the same entries
    ///
    /// Returns `Error::Invariant` describing the first mismatch found.
    pub fn check_invariants(&self) -> Result<()> {
        self.list.check_links()?;

        if self.index.len() != self.list.len() {
            return Err(Error::invariant(format!(
                "index has {} keys but recency list has {} entries",
                self.index.len(),
                self.list.len()
            )));
        }

        if self.list.len() > self.capacity {
            return Err(Error::invariant(format!(
                "{} entries resident with capacity {}",
                self.list.len(),
                self.capacity
            )));
        }

        for (key, handle) in self.index.iter() {
            match self.list.get(handle) {
                Some(entry) if entry.key() == key => {}
                Some(_) => {
                    return Err(Error::invariant(
                        "index key points at an entry holding another key",
                    ))
                }
                None => return Err(Error::invariant("index key points at an empty slot")),
            }
        }

        Ok(())
    }

    /// Miss path: fetch, insert at the head, then evict if over capacity.
    fn fill(&mut self, key: &K) -> std::result::Result<Handle, S::Error> {
        let value = match self.source.fetch(key) {
            Ok(value) => value,
            Err(err) => {
                debug!("value source failed, nothing cached");
                return Err(err);
            }
        };

        let handle = self.list.push_front(key.clone(), value);
        self.index.insert(key.clone(), handle);
        self.stats.record_miss();
        trace!(misses = self.stats.misses(), "cache miss filled");

        if self.list.len() > self.capacity {
            self.evict_lru();
        }

        Ok(handle)
    }

    fn evict_lru(&mut self) {
        if let Some(entry) = self.list.evict_tail() {
            self.index.remove(entry.key());
            self.stats.record_eviction();
            trace!(
                evictions = self.stats.evictions(),
                len = self.list.len(),
                "evicted least recently used entry"
            );
        }
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: ValueSource<K, V, Error = Infallible>,
{
    /// [`get`](Self::get) for sources that cannot fail
    pub fn get_infallible(&mut self, key: &K) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.list.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish()
    }
}
