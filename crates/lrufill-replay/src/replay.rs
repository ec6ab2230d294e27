//! Replay a key trace through an LruCache and summarize the run

use std::fmt::Write as _;

use anyhow::{Context, Result};
use lrufill::{LruCache, ValueSource};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
    /// Most recently used first
    pub resident: Vec<String>,
}

impl Report {
    fn from_cache<S>(cache: &LruCache<String, String, S>) -> Self
    where
        S: ValueSource<String, String>,
    {
        let stats = cache.stats();
        Self {
            capacity: cache.capacity(),
            requests: stats.requests(),
            hits: stats.hits(),
            misses: stats.misses(),
            evictions: stats.evictions(),
            hit_ratio: stats.hit_ratio(),
            resident: cache.keys().cloned().collect(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "capacity:  {}", self.capacity);
        let _ = writeln!(out, "requests:  {}", self.requests);
        let _ = writeln!(out, "hits:      {}", self.hits);
        let _ = writeln!(out, "misses:    {}", self.misses);
        let _ = writeln!(out, "evictions: {}", self.evictions);
        let _ = writeln!(out, "hit ratio: {:.3}", self.hit_ratio);
        let _ = writeln!(out, "resident:  [{}]", self.resident.join(", "));
        out
    }
}

/// Request every key in order; stops at the first value-source failure
pub fn run<S>(capacity: usize, keys: &[String], source: S) -> Result<Report>
where
    S: ValueSource<String, String>,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let mut cache = LruCache::new(capacity, source).context("invalid cache configuration")?;
    info!("Replaying {} requests with capacity {}", keys.len(), capacity);

    for (i, key) in keys.iter().enumerate() {
        let misses = cache.miss_count();
        let value = cache
            .get(key)
            .with_context(|| format!("request {} for key {:?} failed", i + 1, key))?
            .clone();
        let outcome = if cache.miss_count() > misses { "miss" } else { "hit" };
        debug!(request = i + 1, key = %key, value = %value, outcome, "replayed");
    }

    let report = Report::from_cache(&cache);
    info!(
        "Replay finished: {} hits, {} misses, {} evictions",
        report.hits, report.misses, report.evictions
    );
    Ok(report)
}
