//! Cache interface trait for membership query results.

use async_trait::async_trait;
use shaku::Interface;
use trust_core::{TrustResult, User};

/// Cache of membership query results, keyed by string.
///
/// A value is an ordered list of users: the full member list for a
/// per-circle key, or zero/one placeholder users for a per-(circle, user)
/// membership check.
#[async_trait]
pub trait MembershipCache: Interface + Send + Sync {
    /// Returns the cached value, or `None` if it was never set, was
    /// invalidated, or has outlived the TTL.
    async fn get(&self, key: &str) -> TrustResult<Option<Vec<User>>>;

    /// Stores a value, replacing any previous one and restarting its TTL.
    async fn set(&self, key: &str, users: Vec<User>) -> TrustResult<()>;

    /// Current invalidation generation of a key. Read it before loading the
    /// value that will be passed to [`set_if_unchanged`](Self::set_if_unchanged).
    async fn generation(&self, key: &str) -> TrustResult<u64>;

    /// Stores a value only if the key has not been invalidated since
    /// `generation` was read. Returns whether the value was stored.
    async fn set_if_unchanged(
        &self,
        key: &str,
        users: Vec<User>,
        generation: u64,
    ) -> TrustResult<bool>;

    /// Removes an entry and bumps the key's generation. Missing keys are a
    /// no-op apart from the generation bump.
    async fn invalidate(&self, key: &str) -> TrustResult<()>;
}
