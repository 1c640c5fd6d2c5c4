//! Membership service implementation.

use crate::cache::{cache_keys, MembershipCache};
use crate::codec;
use crate::membership_service::MembershipService;
use crate::timeout::{with_timeout, DEFAULT_STORE_TIMEOUT};
use async_trait::async_trait;
use futures::future::try_join_all;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use trust_core::{CircleId, MembershipRecord, TrustError, TrustResult, User, UserId};
use trust_repository::{MembershipRepository, UserRepository};

/// Read-modify-write attempts before a contended write gives up.
pub const MAX_WRITE_ATTEMPTS: usize = 3;

/// Shaku-injectable membership service.
///
/// The store is the only source of truth. The cache holds copies of decoded
/// query results for at most one TTL, and every confirmed write invalidates
/// both the circle's list entry and the affected user's check entry before
/// the write is acknowledged.
#[derive(Component)]
#[shaku(interface = MembershipService)]
pub struct MembershipServiceComponent {
    #[shaku(inject)]
    membership_repository: Arc<dyn MembershipRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn MembershipCache>,
    #[shaku(default = DEFAULT_STORE_TIMEOUT)]
    store_timeout: Duration,
}

impl MembershipServiceComponent {
    /// Creates a membership service with the default store timeout.
    #[must_use]
    pub fn new(
        membership_repository: Arc<dyn MembershipRepository>,
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn MembershipCache>,
    ) -> Self {
        Self {
            membership_repository,
            user_repository,
            cache,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Overrides the deadline applied to every store call.
    #[must_use]
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Loads and decodes a circle's record. No row is an empty, unsaved record.
    async fn load(&self, circle_id: CircleId) -> TrustResult<MembershipRecord> {
        let stored = with_timeout(self.store_timeout, || {
            self.membership_repository.find_by_circle(circle_id)
        })
        .await?;

        match stored {
            Some(row) => Ok(MembershipRecord::stored(
                circle_id,
                codec::decode(&row.members)?,
                row.version,
            )),
            None => Ok(MembershipRecord::empty(circle_id)),
        }
    }

    /// Writes a modified record back, conditional on the version it was read at.
    ///
    /// Returns `false` if another writer got there first.
    async fn persist(&self, record: &MembershipRecord) -> TrustResult<bool> {
        let circle_id = record.circle_id;
        let blob = codec::encode(&record.member_ids);

        with_timeout(self.store_timeout, || async {
            match (record.version, record.is_empty()) {
                (None, true) => Ok(true),
                (None, false) => self.membership_repository.insert(circle_id, &blob).await,
                (Some(version), true) => {
                    self.membership_repository.delete(circle_id, version).await
                }
                (Some(version), false) => {
                    self.membership_repository
                        .update(circle_id, &blob, version)
                        .await
                }
            }
        })
        .await
    }

    /// Runs `apply` against the current record and writes the result,
    /// re-reading on a lost version race. `apply` returns whether it changed
    /// anything; an unchanged record is not written.
    async fn mutate<F>(&self, circle_id: CircleId, user_id: UserId, apply: F) -> TrustResult<()>
    where
        F: Fn(&mut MembershipRecord) -> bool + Send + Sync,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut record = self.load(circle_id).await?;

            if !apply(&mut record) || self.persist(&record).await? {
                return self.invalidate(circle_id, user_id).await;
            }

            metrics::counter!("trust_membership_write_conflicts_total").increment(1);
            warn!(
                "Concurrent write on circle {} (attempt {}/{})",
                circle_id, attempt, MAX_WRITE_ATTEMPTS
            );
        }

        Err(TrustError::conflict(format!(
            "Membership of circle {} kept changing; gave up after {} attempts",
            circle_id, MAX_WRITE_ATTEMPTS
        )))
    }

    async fn invalidate(&self, circle_id: CircleId, user_id: UserId) -> TrustResult<()> {
        self.cache
            .invalidate(&cache_keys::member_list(circle_id))
            .await?;
        self.cache
            .invalidate(&cache_keys::membership_check(circle_id, user_id))
            .await
    }

    /// Cache lookup. A failing cache is treated as a miss.
    async fn cached(&self, key: &str) -> Option<Vec<User>> {
        match self.cache.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Invalidation generation of a key, read before the store so that a
    /// write landing mid-read keeps the result out of the cache.
    async fn fill_generation(&self, key: &str) -> Option<u64> {
        match self.cache.generation(key).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                warn!("Cache generation read failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Cache fill after a successful read. Failures only cost a future miss.
    async fn populate(&self, key: &str, users: Vec<User>, generation: Option<u64>) {
        let Some(generation) = generation else {
            return;
        };
        match self.cache.set_if_unchanged(key, users, generation).await {
            Ok(true) => {}
            Ok(false) => debug!("{} was invalidated during the read; not cached", key),
            Err(e) => warn!("Cache write failed for {}: {}", key, e),
        }
    }

    /// Store outages pass through unchanged; anything else aborts the list
    /// as a partial failure naming the member.
    async fn resolve_member(&self, user_id: UserId) -> TrustResult<User> {
        let found = with_timeout(self.store_timeout, || self.user_repository.find_by_id(user_id))
            .await
            .map_err(|e| match e {
                outage @ (TrustError::StoreUnavailable(_) | TrustError::Timeout(_)) => outage,
                other => TrustError::PartialFailure {
                    user_id: user_id.value(),
                    message: other.to_string(),
                },
            })?;

        found.ok_or_else(|| TrustError::PartialFailure {
            user_id: user_id.value(),
            message: "member has no user record".to_string(),
        })
    }
}

#[async_trait]
impl MembershipService for MembershipServiceComponent {
    async fn add_member(&self, circle_id: CircleId, user_id: UserId) -> TrustResult<()> {
        let circle_id = circle_id.ensure_valid()?;
        let user_id = user_id.ensure_valid()?;
        debug!("Adding user {} to circle {}", user_id, circle_id);

        self.mutate(circle_id, user_id, |record| {
            record.append(user_id);
            true
        })
        .await?;

        info!("User {} added to circle {}", user_id, circle_id);
        Ok(())
    }

    async fn remove_member(&self, circle_id: CircleId, user_id: UserId) -> TrustResult<()> {
        let circle_id = circle_id.ensure_valid()?;
        let user_id = user_id.ensure_valid()?;
        debug!("Removing user {} from circle {}", user_id, circle_id);

        self.mutate(circle_id, user_id, |record| record.remove_all(user_id) > 0)
            .await?;

        info!("User {} removed from circle {}", user_id, circle_id);
        Ok(())
    }

    async fn check_membership(&self, circle_id: CircleId, user_id: UserId) -> TrustResult<bool> {
        let circle_id = circle_id.ensure_valid()?;
        let user_id = user_id.ensure_valid()?;
        let key = cache_keys::membership_check(circle_id, user_id);

        if let Some(cached) = self.cached(&key).await {
            debug!("Cache hit for {}", key);
            return Ok(!cached.is_empty());
        }

        let generation = self.fill_generation(&key).await;
        let record = self.load(circle_id).await?;
        let is_member = record.count_of(user_id) > 0;

        let value = if is_member {
            vec![User::id_only(user_id)]
        } else {
            Vec::new()
        };
        self.populate(&key, value, generation).await;

        Ok(is_member)
    }

    async fn list_members(&self, circle_id: CircleId) -> TrustResult<Vec<User>> {
        let circle_id = circle_id.ensure_valid()?;
        let key = cache_keys::member_list(circle_id);

        if let Some(cached) = self.cached(&key).await {
            debug!("Cache hit for {}", key);
            return Ok(cached);
        }

        let generation = self.fill_generation(&key).await;
        let record = self.load(circle_id).await?;

        let users = try_join_all(
            record
                .member_ids
                .iter()
                .map(|member_id| self.resolve_member(*member_id)),
        )
        .await?;

        self.populate(&key, users.clone(), generation).await;
        Ok(users)
    }
}
