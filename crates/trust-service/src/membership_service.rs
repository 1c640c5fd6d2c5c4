//! Membership service trait definition.

use async_trait::async_trait;
use trust_core::{CircleId, Interface, TrustResult, User, UserId};

/// Circle membership operations.
///
/// Ids are validated before the cache or the store is touched. Writes are
/// acknowledged only after the store confirmed them and the affected cache
/// entries were invalidated.
#[async_trait]
pub trait MembershipService: Interface + Send + Sync {
    /// Appends `user_id` to the circle's member list. Duplicates are kept.
    async fn add_member(&self, circle_id: CircleId, user_id: UserId) -> TrustResult<()>;

    /// Removes every occurrence of `user_id`. Removing a non-member succeeds.
    async fn remove_member(&self, circle_id: CircleId, user_id: UserId) -> TrustResult<()>;

    /// Whether `user_id` appears in the circle's member list.
    async fn check_membership(&self, circle_id: CircleId, user_id: UserId) -> TrustResult<bool>;

    /// Resolves every member to a user, in stored order.
    async fn list_members(&self, circle_id: CircleId) -> TrustResult<Vec<User>>;
}
