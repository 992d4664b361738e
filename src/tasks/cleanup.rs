//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Shortest accepted sweep interval.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task sleeps for `interval` between runs and holds the store's write
/// lock only for one scan. It keeps only a weak reference, so it exits on
/// its own once the store is dropped and never keeps the cache alive.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort it.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::<String>::new()));
/// let cleanup_handle = spawn_cleanup_task(Arc::downgrade(&store), Duration::from_secs(300));
/// // Later:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(
    cache: Weak<RwLock<CacheStore<V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let interval = interval.max(MIN_INTERVAL);

    tokio::spawn(async move {
        debug!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let Some(store) = cache.upgrade() else {
                debug!("Cache dropped, stopping TTL cleanup task");
                break;
            };

            let removed = {
                let mut cache_guard = store.write().await;
                cache_guard.cleanup_expired()
            };
            drop(store);

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
