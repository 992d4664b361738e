//! Validity manager selection
//!
//! Turns a manager choice (by name, by variant, or by handing over an
//! existing manager) into a shared manager handle.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CacheError, Result};
use crate::validity::{KvStore, LocalValidityManager, RemoteValidityManager, ValidityManager};

/// Default lifetime of a remote tag token: 7 days.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

// == Manager Options ==
/// Options forwarded to the remote manager.
#[derive(Clone, Default)]
pub struct ManagerOptions {
    /// Store holding the tokens; required by the remote manager
    pub client: Option<Arc<dyn KvStore>>,
    /// Prepended to every tag key as `{prefix}_{tag}`
    pub prefix: String,
    /// Token lifetime; `None` or zero selects [`DEFAULT_TOKEN_TTL`]
    pub ttl: Option<Duration>,
}

impl fmt::Debug for ManagerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerOptions")
            .field("client", &self.client.is_some())
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}

// == Manager Kind ==
/// Manager implementations selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerKind {
    /// In-process token map
    Local,
    /// Key/value store backed tokens
    Remote,
}

impl ManagerKind {
    pub fn name(&self) -> &'static str {
        match self {
            ManagerKind::Local => "local",
            ManagerKind::Remote => "remote",
        }
    }

    /// Pairs the kind with its options. Local managers ignore the options.
    pub fn with_options(self, options: ManagerOptions) -> ManagerSpec {
        match self {
            ManagerKind::Local => ManagerSpec::Local,
            ManagerKind::Remote => ManagerSpec::Remote(options),
        }
    }
}

impl FromStr for ManagerKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "memory" | "in_memory" => Ok(ManagerKind::Local),
            "remote" | "redis" => Ok(ManagerKind::Remote),
            other => Err(CacheError::Config(format!(
                "unknown validity manager: {}",
                other
            ))),
        }
    }
}

// == Manager Spec ==
/// How a cache obtains its validity manager.
#[derive(Clone, Default)]
pub enum ManagerSpec {
    /// A fresh in-memory registry owned by the cache
    #[default]
    Local,
    /// A remote registry built from the given options
    Remote(ManagerOptions),
    /// An existing manager, possibly shared with other caches or a test double
    Shared(Arc<dyn ValidityManager>),
}

impl fmt::Debug for ManagerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerSpec::Local => f.write_str("Local"),
            ManagerSpec::Remote(options) => f.debug_tuple("Remote").field(options).finish(),
            ManagerSpec::Shared(manager) => {
                f.debug_tuple("Shared").field(&manager.name()).finish()
            }
        }
    }
}

impl From<Arc<dyn ValidityManager>> for ManagerSpec {
    fn from(manager: Arc<dyn ValidityManager>) -> Self {
        ManagerSpec::Shared(manager)
    }
}

impl ManagerSpec {
    /// Builds the manager. Fails fast on missing collaborators.
    pub fn build(self) -> Result<Arc<dyn ValidityManager>> {
        match self {
            ManagerSpec::Local => Ok(Arc::new(LocalValidityManager::new())),
            ManagerSpec::Remote(options) => Ok(Arc::new(RemoteValidityManager::new(options)?)),
            ManagerSpec::Shared(manager) => Ok(manager),
        }
    }
}
