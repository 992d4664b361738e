//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::TagSet;

// == Cache Entry ==
/// A stored value together with the tag signature it was written under.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Normalized tags the value is stored under
    pub tags: TagSet,
    /// Signature of `tags` at write time
    pub signature: String,
    /// The stored value
    pub value: V,
    /// Monotonic expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// A TTL too large to represent as an instant means no expiration.
    pub fn new(tags: TagSet, signature: String, value: V, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));

        Self {
            tags,
            signature,
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time,
    /// so a read at `elapsed >= ttl` never sees the value.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}
