//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use trust_core::{TrustError, TrustResult, User, UserId};

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(UserId::new(row.id), row.name)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn insert(&self, name: &str) -> TrustResult<User> {
        debug!("Inserting user: {}", name);

        let result = sqlx::query("INSERT INTO trust_users (name) VALUES (?)")
            .bind(name)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| TrustError::internal("User id out of range"))?;

        Ok(User::new(UserId::new(id), name))
    }

    async fn find_by_id(&self, id: UserId) -> TrustResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>("SELECT id, name FROM trust_users WHERE id = ?")
            .bind(id.value())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }
}
