//! Configuration Module
//!
//! Loads server configuration from environment variables and turns it into
//! cache options.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheOptions;
use crate::error::Result;
use crate::validity::{ManagerKind, ManagerOptions, DEFAULT_TOKEN_TTL};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in milliseconds for entries without explicit TTL, 0 = unlimited
    pub default_ttl_ms: u64,
    /// Expiration sweep interval in milliseconds
    pub check_period_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Validity manager name (`local` or `remote`)
    pub validity_manager: String,
    /// Redis URL for the remote validity manager
    pub redis_url: String,
    /// Prefix of tag token keys in the remote store
    pub tag_prefix: String,
    /// Lifetime of remote tag tokens in milliseconds
    pub tag_token_ttl_ms: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL_MS` - Default entry TTL in milliseconds (default: 0, unlimited)
    /// - `CHECK_PERIOD_MS` - Expiration sweep interval (default: 300000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `VALIDITY_MANAGER` - `local` or `remote` (default: local)
    /// - `REDIS_URL` - Redis server for `remote` (default: redis://127.0.0.1:6379)
    /// - `TAG_PREFIX` - Tag token key prefix (default: empty)
    /// - `TAG_TOKEN_TTL_MS` - Tag token lifetime (default: 7 days)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl_ms: env_or("DEFAULT_TTL_MS", defaults.default_ttl_ms),
            check_period_ms: env_or("CHECK_PERIOD_MS", defaults.check_period_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            validity_manager: env_or("VALIDITY_MANAGER", defaults.validity_manager),
            redis_url: env_or("REDIS_URL", defaults.redis_url),
            tag_prefix: env_or("TAG_PREFIX", defaults.tag_prefix),
            tag_token_ttl_ms: env_or("TAG_TOKEN_TTL_MS", defaults.tag_token_ttl_ms),
        }
    }

    /// Builds cache options, connecting to the remote store if one is selected.
    pub async fn cache_options(&self) -> Result<CacheOptions> {
        let kind: ManagerKind = self.validity_manager.parse()?;
        let manager_options = match kind {
            ManagerKind::Local => ManagerOptions::default(),
            ManagerKind::Remote => self.remote_manager_options().await?,
        };

        Ok(CacheOptions::default()
            .with_ttl(Duration::from_millis(self.default_ttl_ms))
            .with_check_period(Duration::from_millis(self.check_period_ms))
            .with_manager(kind.with_options(manager_options)))
    }

    #[cfg(feature = "redis")]
    async fn remote_manager_options(&self) -> Result<ManagerOptions> {
        let client = crate::validity::RedisKvStore::connect(&self.redis_url).await?;
        Ok(ManagerOptions {
            client: Some(std::sync::Arc::new(client)),
            prefix: self.tag_prefix.clone(),
            ttl: Some(Duration::from_millis(self.tag_token_ttl_ms)),
        })
    }

    #[cfg(not(feature = "redis"))]
    async fn remote_manager_options(&self) -> Result<ManagerOptions> {
        Err(crate::error::CacheError::Config(
            "the remote validity manager needs the `redis` feature".to_string(),
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_ms: 0,
            check_period_ms: 300_000,
            server_port: 3000,
            validity_manager: "local".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            tag_prefix: String::new(),
            tag_token_ttl_ms: DEFAULT_TOKEN_TTL.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validity::ManagerSpec;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl_ms, 0);
        assert_eq!(config.check_period_ms, 300_000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.validity_manager, "local");
        assert_eq!(config.tag_token_ttl_ms, 604_800_000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DEFAULT_TTL_MS");
        env::remove_var("CHECK_PERIOD_MS");
        env::remove_var("SERVER_PORT");
        env::remove_var("VALIDITY_MANAGER");

        let config = Config::from_env();
        assert_eq!(config.default_ttl_ms, 0);
        assert_eq!(config.check_period_ms, 300_000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.validity_manager, "local");
    }

    #[tokio::test]
    async fn test_local_cache_options() {
        let config = Config {
            default_ttl_ms: 400,
            check_period_ms: 10,
            ..Config::default()
        };

        let options = config.cache_options().await.unwrap();
        assert_eq!(options.ttl, Some(Duration::from_millis(400)));
        assert_eq!(options.check_period, Duration::from_millis(10));
        assert!(matches!(options.manager, ManagerSpec::Local));
    }

    #[tokio::test]
    async fn test_unknown_manager_rejected() {
        let config = Config {
            validity_manager: "memcached".to_string(),
            ..Config::default()
        };

        assert!(config.cache_options().await.is_err());
    }
}
