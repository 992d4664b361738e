//! Cache construction options.

use std::time::Duration;

use crate::validity::ManagerSpec;

/// Default interval between expiration sweeps: 5 minutes.
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(5 * 60);

// == Cache Options ==
/// Options recognized by [`TagCache::new`](crate::cache::TagCache::new).
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// TTL applied when `set` gives none; `None` or zero means unlimited
    pub ttl: Option<Duration>,
    /// Interval between expiration sweeps
    pub check_period: Duration,
    /// Which validity manager backs the cache
    pub manager: ManagerSpec,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl: None,
            check_period: DEFAULT_CHECK_PERIOD,
            manager: ManagerSpec::Local,
        }
    }
}

impl CacheOptions {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_check_period(mut self, check_period: Duration) -> Self {
        self.check_period = check_period;
        self
    }

    pub fn with_manager(mut self, manager: ManagerSpec) -> Self {
        self.manager = manager;
        self
    }

    /// The default TTL with zero treated as unlimited.
    pub(crate) fn effective_ttl(&self) -> Option<Duration> {
        self.ttl.filter(|ttl| !ttl.is_zero())
    }
}
