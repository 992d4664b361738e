//! Tag token minting.

use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Mints a fresh numeric-string token of the form `{sequence}.{random}`.
///
/// The sequence part makes successive tokens from one process distinct; the
/// random part keeps tokens from different processes sharing a registry
/// apart.
pub fn mint_token() -> String {
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}.{}", sequence, rand::random::<u64>())
}
