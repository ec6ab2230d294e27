//! Value sources consulted on a cache miss

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

/// Produces the value for a key that is not resident in the cache.
///
/// Called exactly once per miss. A returned error reaches the caller of
/// [`LruCache::get`](crate::LruCache::get) unchanged and nothing is cached.
pub trait ValueSource<K, V> {
    /// Failure type reported by [`fetch`](Self::fetch)
    type Error;

    /// Fetch the value for `key`
    fn fetch(&mut self, key: &K) -> Result<V, Self::Error>;
}

impl<K, V, S> ValueSource<K, V> for &mut S
where
    S: ValueSource<K, V> + ?Sized,
{
    type Error = S::Error;

    fn fetch(&mut self, key: &K) -> Result<V, Self::Error> {
        (**self).fetch(key)
    }
}

/// Infallible source backed by a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

/// Wrap a closure that always produces a value
///
/// ```
/// use lrufill::{from_fn, LruCache};
///
/// let mut cache = LruCache::new(2, from_fn(|k: &u32| k * 10)).unwrap();
/// assert_eq!(*cache.get_infallible(&4), 40);
/// ```
pub fn from_fn<K, V, F>(f: F) -> FromFn<F>
where
    F: FnMut(&K) -> V,
{
    FromFn(f)
}

impl<K, V, F> ValueSource<K, V> for FromFn<F>
where
    F: FnMut(&K) -> V,
{
    type Error = Infallible;

    fn fetch(&mut self, key: &K) -> Result<V, Self::Error> {
        Ok((self.0)(key))
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

/// Fallible source backed by a closure. See [`try_from_fn`].
pub struct TryFromFn<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

/// Wrap a closure that may fail with `E`
pub fn try_from_fn<K, V, E, F>(f: F) -> TryFromFn<F, E>
where
    F: FnMut(&K) -> Result<V, E>,
{
    TryFromFn {
        f,
        _error: PhantomData,
    }
}

impl<K, V, E, F> ValueSource<K, V> for TryFromFn<F, E>
where
    F: FnMut(&K) -> Result<V, E>,
{
    type Error = E;

    fn fetch(&mut self, key: &K) -> Result<V, Self::Error> {
        (self.f)(key)
    }
}

impl<F, E> fmt::Debug for TryFromFn<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TryFromFn")
    }
}

/// Counts fetch calls made against the wrapped source
#[derive(Debug, Clone, Default)]
pub struct Counting<S> {
    inner: S,
    fetched: u64,
    failed: u64,
}

impl<S> Counting<S> {
    /// Wrap `inner` with zeroed counters
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fetched: 0,
            failed: 0,
        }
    }

    /// Calls that produced a value
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    /// Calls that returned an error
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// All calls, successful or not
    pub fn calls(&self) -> u64 {
        self.fetched + self.failed
    }

    /// Borrow the wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the source, dropping the counters
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<K, V, S> ValueSource<K, V> for Counting<S>
where
    S: ValueSource<K, V>,
{
    type Error = S::Error;

    fn fetch(&mut self, key: &K) -> Result<V, Self::Error> {
        let result = self.inner.fetch(key);
        match result {
            Ok(_) => self.fetched += 1,
            Err(_) => self.failed += 1,
        }
        result
    }
}
