//! # lrufill
//!
//! Fixed-capacity get-or-fetch cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **Recency index**: AHash map from key to entry handle (O(1) lookup)
//! - **Recency list**: arena-backed doubly-linked list, most recent first
//!   (O(1) promotion and eviction)
//! - **LruCache**: fills misses from a [`ValueSource`] and counts them
//! - **SharedCache**: the same cache behind a mutex
//!
//! ```
//! use lrufill::{from_fn, LruCache};
//!
//! let mut cache = LruCache::new(5, from_fn(|k: &u32| k * 2)).unwrap();
//! for k in 0..5 {
//!     cache.get_infallible(&k);
//! }
//! cache.get_infallible(&0); // hit
//! cache.get_infallible(&5); // miss, evicts 1
//!
//! assert_eq!(cache.miss_count(), 6);
//! assert!(!cache.contains(&1));
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod index;
mod list;
mod shared;
mod source;
mod stats;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use shared::SharedCache;
pub use source::{from_fn, try_from_fn, Counting, FromFn, TryFromFn, ValueSource};
pub use stats::CacheStats;
