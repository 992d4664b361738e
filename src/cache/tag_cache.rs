//! Tag Cache Module
//!
//! Async cache keyed by tag sets. Values are validated lazily on read by
//! comparing the signature stored at write time with the current one.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{
    CacheEntry, CacheOptions, CacheStats, CacheStore, TagSet, DEFAULT_CHECK_PERIOD,
};
use crate::error::Result;
use crate::tasks::spawn_cleanup_task;
use crate::validity::{LocalValidityManager, ValidityManager};

struct Shared<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    manager: Arc<dyn ValidityManager>,
    default_ttl: Option<Duration>,
    sweeper: Option<JoinHandle<()>>,
}

impl<V> Drop for Shared<V> {
    fn drop(&mut self) {
        if let Some(sweeper) = &self.sweeper {
            sweeper.abort();
        }
    }
}

// == Tag Cache ==
/// Value cache with O(1) invalidation by tag.
///
/// Cloning yields another handle to the same storage. The expiration sweep
/// stops once the last handle is dropped.
pub struct TagCache<V> {
    shared: Arc<Shared<V>>,
}

impl<V> Clone for TagCache<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<V> fmt::Debug for TagCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagCache")
            .field("manager", &self.shared.manager.name())
            .field("default_ttl", &self.shared.default_ttl)
            .field("sweeping", &self.shared.sweeper.is_some())
            .finish()
    }
}

impl<V> TagCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache from options.
    ///
    /// Fails only when the validity manager cannot be built.
    pub fn new(options: CacheOptions) -> Result<Self> {
        let default_ttl = options.effective_ttl();
        let manager = options.manager.build()?;
        Ok(Self::with_manager(manager, default_ttl, options.check_period))
    }

    /// Creates a cache with default options and an in-memory registry.
    pub fn local() -> Self {
        Self::with_manager(
            Arc::new(LocalValidityManager::new()),
            None,
            DEFAULT_CHECK_PERIOD,
        )
    }

    /// Creates a cache around an already built manager.
    ///
    /// The expiration sweep is spawned when called from within a tokio
    /// runtime; otherwise only reads evict expired entries.
    pub fn with_manager(
        manager: Arc<dyn ValidityManager>,
        default_ttl: Option<Duration>,
        check_period: Duration,
    ) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new()));

        let sweeper = match tokio::runtime::Handle::try_current() {
            Ok(_) => Some(spawn_cleanup_task(Arc::downgrade(&store), check_period)),
            Err(_) => {
                debug!("No tokio runtime, expiration sweep disabled");
                None
            }
        };

        info!(
            "Tag cache created: manager={}, default_ttl={:?}",
            manager.name(),
            default_ttl
        );

        Self {
            shared: Arc::new(Shared {
                store,
                manager,
                default_ttl,
                sweeper,
            }),
        }
    }

    // == Has ==
    /// Returns true if a live entry is stored under `tags`.
    ///
    /// Expired or invalidated entries are removed as a side effect.
    pub async fn has(&self, tags: impl Into<TagSet>) -> Result<bool> {
        Ok(self.check(tags.into(), |_| ()).await?.is_some())
    }

    // == Get ==
    /// Returns the live value stored under `tags`, or `None`.
    pub async fn get(&self, tags: impl Into<TagSet>) -> Result<Option<V>> {
        self.check(tags.into(), |entry| entry.value.clone()).await
    }

    // == Set ==
    /// Stores `value` under `tags`, replacing any previous entry.
    ///
    /// A zero `ttl` falls back to the cache default.
    pub async fn set(
        &self,
        tags: impl Into<TagSet>,
        value: V,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let tags = tags.into();
        let ttl = ttl.filter(|ttl| !ttl.is_zero()).or(self.shared.default_ttl);

        let signature = self.shared.manager.sign(tags.as_slice()).await?;
        let key = tags.storage_key();
        let entry = CacheEntry::new(tags, signature, value, ttl);

        self.shared.store.write().await.insert(key, entry);
        Ok(())
    }

    // == Delete ==
    /// Removes the entry under `tags`, returning whether one was stored.
    pub async fn delete(&self, tags: impl Into<TagSet>) -> bool {
        let key = tags.into().storage_key();
        self.shared.store.write().await.remove(&key)
    }

    // == Invalidate ==
    /// Invalidates every entry stored under any of `tags`.
    ///
    /// Only the registry is updated; affected entries are dropped when next
    /// read or when they expire.
    pub async fn invalidate(&self, tags: impl Into<TagSet>) -> Result<()> {
        let tags = tags.into();
        self.shared.manager.update(tags.as_slice()).await?;

        self.shared.store.write().await.record_invalidation();
        debug!("Invalidated tags {:?}", tags.as_slice());
        Ok(())
    }

    // == Clear ==
    /// Drops all stored entries. Registry tokens are left untouched.
    pub async fn clear(&self) {
        self.shared.store.write().await.clear();
    }

    /// Runs one expiration sweep immediately.
    pub async fn purge_expired(&self) -> usize {
        self.shared.store.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.shared.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shared.store.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.shared.store.read().await.stats()
    }

    /// The validity manager; hand it to another cache through
    /// [`ManagerSpec::Shared`](crate::validity::ManagerSpec::Shared) to share
    /// invalidations between them.
    pub fn manager(&self) -> Arc<dyn ValidityManager> {
        Arc::clone(&self.shared.manager)
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.shared.default_ttl
    }

    // == Check ==
    /// Looks up a live entry and projects it through `read`.
    ///
    /// The store lock is released while the manager signs, so a concurrent
    /// write may land in between; stale removal only drops the entry that
    /// was actually judged stale.
    async fn check<R>(
        &self,
        tags: TagSet,
        read: impl FnOnce(&CacheEntry<V>) -> R,
    ) -> Result<Option<R>> {
        let key = tags.storage_key();

        let (stored_signature, output) = {
            let mut store = self.shared.store.write().await;
            match store.lookup(&key) {
                Some(entry) => (entry.signature.clone(), read(entry)),
                None => return Ok(None),
            }
        };

        let signature = self.shared.manager.sign(tags.as_slice()).await?;

        let mut store = self.shared.store.write().await;
        if signature != stored_signature {
            if store.remove_stale(&key, &stored_signature) {
                debug!("Evicted stale entry {}", key);
            }
            return Ok(None);
        }

        store.record_hit();
        Ok(Some(output))
    }
}
