//! Redis-backed [`KvStore`]
//!
//! Requires the `redis` feature to be enabled.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client};
use tracing::info;

use crate::error::{BackendError, CacheError, Result};
use crate::validity::KvStore;

/// Token store on a Redis server, reached over one multiplexed connection.
///
/// Reads use `MGET`; writes are `SET key value PX ttl` commands wrapped in a
/// `MULTI`/`EXEC` transaction.
#[derive(Clone)]
pub struct RedisKvStore {
    conn: MultiplexedConnection,
}

impl RedisKvStore {
    /// Connects eagerly so an unreachable server is reported at startup.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| CacheError::Config(format!("Redis client error: {}", e)))?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Config(format!("Redis connection error: {}", e)))?;

        info!("Connected to Redis tag registry at {}", url);
        Ok(Self { conn })
    }
}

/// Millisecond expiry for `SET .. PX`, which rejects zero.
fn px_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn mget(
        &self,
        keys: &[String],
    ) -> std::result::Result<Vec<Option<String>>, BackendError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await?;
        Ok(values)
    }

    async fn set_many_with_ttl(
        &self,
        entries: &[(String, String)],
        ttl: Duration,
    ) -> std::result::Result<(), BackendError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            pipe.cmd("SET")
                .arg(key)
                .arg(value)
                .arg("PX")
                .arg(px_millis(ttl))
                .ignore();
        }

        let mut conn = self.conn.clone();
        let () = pipe.query_async(&mut conn).await?;
        Ok(())
    }
}
