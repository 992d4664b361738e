//! Key/value store collaborator for the remote tag registry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::BackendError;

// == KV Store ==
/// The two remote operations a token registry needs.
///
/// Errors are returned untranslated so callers see the store's own detail.
/// Timeouts and retries, if any, belong to the implementation.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads `keys` in one round trip, one slot per key.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>, BackendError>;

    /// Writes every `(key, value)` pair with a `ttl` expiry as a single
    /// transaction.
    async fn set_many_with_ttl(
        &self,
        entries: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), BackendError>;
}

// == Memory KV Store ==
/// Process-local [`KvStore`] with per-key expiry.
///
/// Stands in for a remote store in tests and single-node deployments.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: RwLock<HashMap<String, (String, Option<Instant>)>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, expired ones included until overwritten.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<String>>, BackendError> {
        let values = self.values.read().await;
        let now = Instant::now();

        Ok(keys
            .iter()
            .map(|key| match values.get(key) {
                Some((value, expires_at)) if expires_at.map_or(true, |at| at > now) => {
                    Some(value.clone())
                }
                _ => None,
            })
            .collect())
    }

    async fn set_many_with_ttl(
        &self,
        entries: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), BackendError> {
        let mut values = self.values.write().await;
        let now = Instant::now();
        let expires_at = now.checked_add(ttl);

        values.retain(|_, (_, expiry)| expiry.map_or(true, |at| at > now));
        for (key, value) in entries {
            values.insert(key.clone(), (value.clone(), expires_at));
        }
        Ok(())
    }
}
