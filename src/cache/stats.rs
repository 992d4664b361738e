//! Cache Statistics Module
//!
//! Tracks cache lookups and the ways entries leave the store.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a live entry
    pub hits: u64,
    /// Number of lookups that found nothing live
    pub misses: u64,
    /// Entries removed because their TTL elapsed (lazily or by the sweep)
    pub expired: u64,
    /// Entries removed because their tag signature drifted
    pub stale: u64,
    /// Number of `invalidate` calls
    pub invalidations: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn record_stale(&mut self) {
        self.stale += 1;
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
