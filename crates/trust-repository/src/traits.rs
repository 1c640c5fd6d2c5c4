//! Repository trait definitions.
//!
//! Every method distinguishes "no row" (`Ok(None)` / `Ok(false)`) from a
//! transport or query failure (`Err`).

use async_trait::async_trait;
use trust_core::{Circle, CircleId, Interface, TrustResult, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Inserts a user and returns it with its store-assigned id.
    async fn insert(&self, name: &str) -> TrustResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> TrustResult<Option<User>>;
}

/// Circle repository trait.
#[async_trait]
pub trait CircleRepository: Interface + Send + Sync {
    /// Inserts a circle and returns it with its store-assigned id.
    ///
    /// Fails with `Validation` if the owner does not exist.
    async fn insert(&self, owner_id: UserId, name: &str) -> TrustResult<Circle>;

    /// Finds a circle by ID.
    async fn find_by_id(&self, id: CircleId) -> TrustResult<Option<Circle>>;
}

/// A membership row as persisted: the encoded member list and its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMembership {
    pub circle_id: CircleId,
    pub members: Vec<u8>,
    pub version: i64,
}

/// Membership record repository.
///
/// Writes are conditional so that concurrent read-modify-write cycles on one
/// circle cannot silently overwrite each other.
#[async_trait]
pub trait MembershipRepository: Interface + Send + Sync {
    /// Loads the membership row for a circle.
    async fn find_by_circle(&self, circle_id: CircleId) -> TrustResult<Option<StoredMembership>>;

    /// Creates the row at version 1. Returns `false` if a row already exists.
    async fn insert(&self, circle_id: CircleId, members: &[u8]) -> TrustResult<bool>;

    /// Replaces the blob and bumps the version.
    ///
    /// Returns `false` if the row is gone or its version is no longer
    /// `expected_version`.
    async fn update(
        &self,
        circle_id: CircleId,
        members: &[u8],
        expected_version: i64,
    ) -> TrustResult<bool>;

    /// Deletes the row if it is still at `expected_version`.
    async fn delete(&self, circle_id: CircleId, expected_version: i64) -> TrustResult<bool>;
}
