//! Cache Module
//!
//! Provides an in-memory cache keyed by tag sets, with TTL expiration and
//! tag-based invalidation through a validity manager.

mod entry;
mod options;
mod stats;
mod store;
mod tag_cache;
mod tags;


// Re-export public types
pub use entry::CacheEntry;
pub use options::{CacheOptions, DEFAULT_CHECK_PERIOD};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use tag_cache::TagCache;
pub use tags::TagSet;
