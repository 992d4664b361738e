//! Validity Module
//!
//! Tag validity registries. A registry maps each tag to an opaque token;
//! invalidating a tag mints a new token, which changes the signature of every
//! tag set containing it. Cached entries are never touched on invalidation.
//!
//! # Implementations
//! - [`LocalValidityManager`]: tokens in process memory
//! - [`RemoteValidityManager`]: tokens in a [`KvStore`] with per-token expiry
//!
//! A single manager may back several caches (see [`ManagerSpec::Shared`]);
//! an `invalidate` on any of them then affects all of them.

mod factory;
mod kv;
mod local;
#[cfg(feature = "redis")]
mod redis_store;
mod remote;
mod token;

use async_trait::async_trait;

use crate::error::Result;

pub use factory::{ManagerKind, ManagerOptions, ManagerSpec, DEFAULT_TOKEN_TTL};
pub use kv::{KvStore, MemoryKvStore};
pub use local::LocalValidityManager;
#[cfg(feature = "redis")]
pub use redis_store::RedisKvStore;
pub use remote::RemoteValidityManager;
pub use token::mint_token;

/// Separator between tokens in a signature.
pub const SIGNATURE_SEPARATOR: &str = "_";

// == Validity Manager ==
/// Registry of per-tag tokens.
///
/// `sign` must be deterministic for unchanged tokens and must preserve the
/// order of `tags`. `update` must give every listed tag a token different
/// from any it had before.
#[async_trait]
pub trait ValidityManager: Send + Sync {
    /// Returns the current tokens of `tags` joined in order; unknown tags
    /// contribute an empty token.
    async fn sign(&self, tags: &[String]) -> Result<String>;

    /// Mints fresh tokens for `tags`.
    async fn update(&self, tags: &[String]) -> Result<()>;

    /// Human-readable manager name for logs
    fn name(&self) -> &'static str;
}

/// Joins per-tag tokens into a signature, missing tokens as empty strings.
pub(crate) fn join_tokens<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut signature = String::new();
    for (i, token) in tokens.into_iter().enumerate() {
        if i > 0 {
            signature.push_str(SIGNATURE_SEPARATOR);
        }
        if let Some(token) = token {
            signature.push_str(token.as_ref());
        }
    }
    signature
}
