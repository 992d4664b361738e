//! Cache Store Module
//!
//! Synchronous storage map keyed by composite tag keys. Every mutation here
//! is a single non-suspending step; signature checks happen in `TagCache`.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Entry storage with TTL bookkeeping and statistics.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Composite key -> entry
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Insert ==
    /// Stores an entry, unconditionally replacing any previous one.
    pub fn insert(&mut self, key: String, entry: CacheEntry<V>) {
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Lookup ==
    /// Returns the entry under `key` unless it is missing or expired.
    ///
    /// Expired entries are removed on the spot. Both outcomes count as a
    /// miss; a found entry is not yet a hit until its signature is checked.
    pub fn lookup(&mut self, key: &str) -> Option<&CacheEntry<V>> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expired(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.entries.get(key)
    }

    // == Remove Stale ==
    /// Removes the entry under `key` if it still carries `signature`.
    ///
    /// A concurrent `insert` may have replaced the entry since it was judged
    /// stale; a replacement with a different signature is left alone.
    pub fn remove_stale(&mut self, key: &str, signature: &str) -> bool {
        self.stats.record_miss();

        let still_stale = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.signature == signature);

        if still_stale {
            self.entries.remove(key);
            self.stats.record_stale();
            self.stats.set_total_entries(self.entries.len());
        }

        still_stale
    }

    pub fn record_hit(&mut self) {
        self.stats.record_hit();
    }

    pub fn record_invalidation(&mut self) {
        self.stats.record_invalidation();
    }

    // == Remove ==
    /// Removes an entry by key, returning whether one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Drops every stored entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let count = before - self.entries.len();

        self.stats.record_expired(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TagSet;
    use std::thread::sleep;
    use std::time::Duration;

    fn entry(signature: &str, value: &str, ttl: Option<Duration>) -> CacheEntry<String> {
        CacheEntry::new(
            TagSet::from("k"),
            signature.to_string(),
            value.to_string(),
            ttl,
        )
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_insert_and_lookup() {
        let mut store = CacheStore::new();

        store.insert("k_1".to_string(), entry("", "value1", None));
        let found = store.lookup("k_1").unwrap();

        assert_eq!(found.value, "value1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lookup_nonexistent() {
        let mut store: CacheStore<String> = CacheStore::new();

        assert!(store.lookup("nonexistent").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.insert("k_1".to_string(), entry("", "value1", None));
        store.insert("k_1".to_string(), entry("", "value2", None));

        assert_eq!(store.lookup("k_1").unwrap().value, "value2");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lookup_removes_expired() {
        let mut store = CacheStore::new();

        store.insert(
            "k_1".to_string(),
            entry("", "value1", Some(Duration::from_millis(30))),
        );
        assert!(store.lookup("k_1").is_some());

        sleep(Duration::from_millis(50));

        assert!(store.lookup("k_1").is_none());
        assert!(store.is_empty());

        let stats = store.stats();
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new();

        store.insert("k_1".to_string(), entry("", "value1", None));

        assert!(store.remove("k_1"));
        assert!(!store.remove("k_1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_stale_matches_signature() {
        let mut store = CacheStore::new();

        store.insert("k_1".to_string(), entry("old", "value1", None));

        assert!(store.remove_stale("k_1", "old"));
        assert!(store.is_empty());
        assert_eq!(store.stats().stale, 1);
    }

    #[test]
    fn test_remove_stale_keeps_replacement() {
        let mut store = CacheStore::new();

        store.insert("k_1".to_string(), entry("new", "value2", None));

        assert!(!store.remove_stale("k_1", "old"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().stale, 0);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new();

        store.insert(
            "a_1".to_string(),
            entry("", "value1", Some(Duration::from_millis(30))),
        );
        store.insert(
            "b_1".to_string(),
            entry("", "value2", Some(Duration::from_secs(10))),
        );
        store.insert("c_1".to_string(), entry("", "value3", None));

        sleep(Duration::from_millis(50));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 2);
        assert!(store.lookup("b_1").is_some());
        assert!(store.lookup("c_1").is_some());
    }

    #[test]
    fn test_store_clear_keeps_counters() {
        let mut store = CacheStore::new();

        store.insert("a_1".to_string(), entry("", "value1", None));
        store.record_hit();
        store.clear();

        let stats = store.stats();
        assert!(store.is_empty());
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hits, 1);
    }
}
