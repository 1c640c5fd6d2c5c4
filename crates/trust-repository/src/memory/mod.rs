//! In-memory repository implementations.
//!
//! All three repositories share one [`InMemoryStore`]; pass the same handle
//! to each of them.

mod store;

pub use store::InMemoryStore;

use crate::traits::{CircleRepository, MembershipRepository, StoredMembership, UserRepository};
use async_trait::async_trait;
use shaku::Component;
use store::Table;
use tracing::debug;
use trust_core::{
    Circle, CircleId, HealthCheck, HealthStatus, TrustError, TrustResult, User, UserId,
};

/// In-memory user repository.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MemoryUserRepository {
    store: InMemoryStore,
}

impl MemoryUserRepository {
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, name: &str) -> TrustResult<User> {
        self.store.enter(Table::Users, true).await?;
        let user = self.store.with_tables(|tables| {
            let user = User::new(tables.next_user_id(), name);
            tables.users.insert(user.id, user.clone());
            user
        });
        debug!("Inserted user {}", user.id);
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> TrustResult<Option<User>> {
        self.store.enter(Table::Users, false).await?;
        Ok(self.store.with_tables(|tables| tables.users.get(&id).cloned()))
    }
}

/// In-memory circle repository.
#[derive(Component, Clone)]
#[shaku(interface = CircleRepository)]
pub struct MemoryCircleRepository {
    store: InMemoryStore,
}

impl MemoryCircleRepository {
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CircleRepository for MemoryCircleRepository {
    async fn insert(&self, owner_id: UserId, name: &str) -> TrustResult<Circle> {
        self.store.enter(Table::Circles, true).await?;
        self.store.with_tables(|tables| {
            if !tables.users.contains_key(&owner_id) {
                return Err(TrustError::validation(format!(
                    "Referenced row does not exist: owner {}",
                    owner_id
                )));
            }
            let circle = Circle::new(tables.next_circle_id(), owner_id, name);
            tables.circles.insert(circle.id, circle.clone());
            Ok(circle)
        })
    }

    async fn find_by_id(&self, id: CircleId) -> TrustResult<Option<Circle>> {
        self.store.enter(Table::Circles, false).await?;
        Ok(self.store.with_tables(|tables| tables.circles.get(&id).cloned()))
    }
}

/// In-memory membership repository with the same version semantics as MySQL.
#[derive(Component, Clone)]
#[shaku(interface = MembershipRepository)]
pub struct MemoryMembershipRepository {
    store: InMemoryStore,
}

impl MemoryMembershipRepository {
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MembershipRepository for MemoryMembershipRepository {
    async fn find_by_circle(&self, circle_id: CircleId) -> TrustResult<Option<StoredMembership>> {
        self.store.enter(Table::Memberships, false).await?;
        Ok(self
            .store
            .with_tables(|tables| tables.memberships.get(&circle_id).cloned()))
    }

    async fn insert(&self, circle_id: CircleId, members: &[u8]) -> TrustResult<bool> {
        self.store.enter(Table::Memberships, true).await?;
        self.store.with_tables(|tables| {
            if !tables.circles.contains_key(&circle_id) {
                return Err(TrustError::validation(format!(
                    "Referenced row does not exist: circle {}",
                    circle_id
                )));
            }
            if tables.memberships.contains_key(&circle_id) {
                return Ok(false);
            }
            tables.memberships.insert(
                circle_id,
                StoredMembership {
                    circle_id,
                    members: members.to_vec(),
                    version: 1,
                },
            );
            Ok(true)
        })
    }

    async fn update(
        &self,
        circle_id: CircleId,
        members: &[u8],
        expected_version: i64,
    ) -> TrustResult<bool> {
        self.store.enter(Table::Memberships, true).await?;
        Ok(self.store.with_tables(|tables| {
            match tables.memberships.get_mut(&circle_id) {
                Some(row) if row.version == expected_version => {
                    row.members = members.to_vec();
                    row.version += 1;
                    true
                }
                _ => false,
            }
        }))
    }

    async fn delete(&self, circle_id: CircleId, expected_version: i64) -> TrustResult<bool> {
        self.store.enter(Table::Memberships, true).await?;
        Ok(self.store.with_tables(|tables| {
            let current = tables.memberships.get(&circle_id).map(|row| row.version);
            if current == Some(expected_version) {
                tables.memberships.remove(&circle_id);
                true
            } else {
                false
            }
        }))
    }
}

/// Readiness check for the in-memory backend.
#[derive(Component, Default)]
#[shaku(interface = HealthCheck)]
pub struct MemoryHealthCheck {}

#[async_trait]
impl HealthCheck for MemoryHealthCheck {
    fn name(&self) -> &str {
        "memory"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
