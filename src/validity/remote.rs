//! Tag registry backed by a remote key/value store.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::{CacheError, Result};
use crate::validity::{
    join_tokens, mint_token, KvStore, ManagerOptions, ValidityManager, DEFAULT_TOKEN_TTL,
};

/// Shortest token lifetime a store can express; shorter ones fall back to the default.
const MIN_TOKEN_TTL: Duration = Duration::from_millis(1);

// == Remote Validity Manager ==
/// Tag tokens stored remotely under `{prefix}_{tag}` keys.
///
/// Every token carries its own expiry so tags that stop being invalidated
/// eventually vanish from the store. An expired token reads as blank, which
/// changes the signature of entries written while it was alive.
pub struct RemoteValidityManager {
    client: Arc<dyn KvStore>,
    prefix: String,
    ttl: Duration,
}

impl fmt::Debug for RemoteValidityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteValidityManager")
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl RemoteValidityManager {
    // == Constructor ==
    /// Builds the manager, failing immediately when no client is supplied.
    ///
    /// A token TTL that is absent or below one millisecond uses the default.
    pub fn new(options: ManagerOptions) -> Result<Self> {
        let client = options.client.ok_or_else(|| {
            CacheError::Config("remote validity manager requires a key/value client".to_string())
        })?;

        Ok(Self {
            client,
            prefix: options.prefix,
            ttl: options
                .ttl
                .filter(|ttl| *ttl >= MIN_TOKEN_TTL)
                .unwrap_or(DEFAULT_TOKEN_TTL),
        })
    }

    /// Shorthand for a manager with an empty prefix and the default token TTL.
    pub fn with_client(client: Arc<dyn KvStore>) -> Self {
        Self {
            client,
            prefix: String::new(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.ttl
    }

    fn registry_key(&self, tag: &str) -> String {
        format!("{}_{}", self.prefix, tag)
    }
}

#[async_trait]
impl ValidityManager for RemoteValidityManager {
    async fn sign(&self, tags: &[String]) -> Result<String> {
        let keys: Vec<String> = tags.iter().map(|tag| self.registry_key(tag)).collect();

        let tokens = self.client.mget(&keys).await.map_err(|err| {
            warn!("Tag registry read failed: {}", err);
            CacheError::Backend(err)
        })?;

        Ok(join_tokens(tokens))
    }

    async fn update(&self, tags: &[String]) -> Result<()> {
        let entries: Vec<(String, String)> = tags
            .iter()
            .map(|tag| (self.registry_key(tag), mint_token()))
            .collect();

        self.client
            .set_many_with_ttl(&entries, self.ttl)
            .await
            .map_err(|err| {
                warn!("Tag registry write failed: {}", err);
                CacheError::Backend(err)
            })
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
