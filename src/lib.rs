//! Tag Cache - An in-process value cache with group invalidation by tag
//!
//! Entries are addressed by a set of tags. Invalidating a tag makes every
//! entry stored under it stale in O(1), without enumerating those entries:
//! each entry carries a signature of its tags' tokens, and reads compare it
//! with the current one.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod validity;

pub use api::AppState;
pub use cache::{CacheOptions, TagCache, TagSet};
pub use config::Config;
pub use error::{CacheError, Result};
pub use validity::{ManagerKind, ManagerOptions, ManagerSpec, ValidityManager};
