//! In-process TTL cache.

use super::MembershipCache;
use async_trait::async_trait;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use trust_core::{TrustResult, User};

/// Lifetime of every cache entry (1 minute).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    users: Vec<User>,
    inserted_at: Instant,
}

/// Entries plus the invalidation count of every key that was ever invalidated.
#[derive(Debug, Default)]
pub struct CacheState {
    entries: HashMap<String, CacheEntry>,
    generations: HashMap<String, u64>,
}

impl CacheState {
    fn generation(&self, key: &str) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }
}

/// Process-wide membership cache with a single fixed TTL.
///
/// One mutex guards the whole map and is only held for the map operation
/// itself. Expired entries are dropped when a `get` finds them; there is no
/// background sweep and no size bound.
#[derive(Component)]
#[shaku(interface = MembershipCache)]
pub struct TtlMembershipCache {
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl TtlMembershipCache {
    /// Creates a cache with the default 60 second TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL applied to every entry.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::default(),
        }
    }

    /// Module parameters for a cache with the given TTL.
    #[must_use]
    pub fn parameters(ttl: Duration) -> TtlMembershipCacheParameters {
        TtlMembershipCacheParameters {
            ttl,
            state: Mutex::default(),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included until read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    fn insert(state: &mut CacheState, key: &str, users: Vec<User>) {
        let entry = CacheEntry {
            users,
            inserted_at: Instant::now(),
        };
        state.entries.insert(key.to_string(), entry);
    }
}

impl Default for TtlMembershipCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipCache for TtlMembershipCache {
    async fn get(&self, key: &str) -> TrustResult<Option<Vec<User>>> {
        let mut state = self.state.lock();

        let Some(entry) = state.entries.get(key) else {
            metrics::counter!("trust_cache_misses_total").increment(1);
            return Ok(None);
        };

        if entry.inserted_at.elapsed() > self.ttl {
            state.entries.remove(key);
            debug!("Cache entry expired: {}", key);
            metrics::counter!("trust_cache_expired_total").increment(1);
            metrics::counter!("trust_cache_misses_total").increment(1);
            return Ok(None);
        }

        metrics::counter!("trust_cache_hits_total").increment(1);
        Ok(Some(entry.users.clone()))
    }

    async fn set(&self, key: &str, users: Vec<User>) -> TrustResult<()> {
        Self::insert(&mut self.state.lock(), key, users);
        Ok(())
    }

    async fn generation(&self, key: &str) -> TrustResult<u64> {
        Ok(self.state.lock().generation(key))
    }

    async fn set_if_unchanged(
        &self,
        key: &str,
        users: Vec<User>,
        generation: u64,
    ) -> TrustResult<bool> {
        let mut state = self.state.lock();
        if state.generation(key) != generation {
            debug!("Skipping stale fill for {}", key);
            return Ok(false);
        }
        Self::insert(&mut state, key, users);
        Ok(true)
    }

    async fn invalidate(&self, key: &str) -> TrustResult<()> {
        let mut state = self.state.lock();
        *state.generations.entry(key.to_string()).or_insert(0) += 1;
        if state.entries.remove(key).is_some() {
            debug!("Cache entry invalidated: {}", key);
            metrics::counter!("trust_cache_invalidations_total").increment(1);
        }
        Ok(())
    }
}
