//! MySQL circle repository implementation.

use crate::{traits::CircleRepository, DatabasePoolInterface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use trust_core::{Circle, CircleId, TrustError, TrustResult, UserId};

/// MySQL circle repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CircleRepository)]
pub struct MySqlCircleRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCircleRepository {
    /// Creates a new MySQL circle repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CircleRow {
    id: i64,
    owner_id: i64,
    name: String,
}

impl From<CircleRow> for Circle {
    fn from(row: CircleRow) -> Self {
        Circle::new(CircleId::new(row.id), UserId::new(row.owner_id), row.name)
    }
}

#[async_trait]
impl CircleRepository for MySqlCircleRepository {
    async fn insert(&self, owner_id: UserId, name: &str) -> TrustResult<Circle> {
        debug!("Inserting circle '{}' owned by {}", name, owner_id);

        // A missing owner surfaces as a foreign-key violation.
        let result = sqlx::query("INSERT INTO circles (owner_id, name) VALUES (?, ?)")
            .bind(owner_id.value())
            .bind(name)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| TrustError::internal("Circle id out of range"))?;

        Ok(Circle::new(CircleId::new(id), owner_id, name))
    }

    async fn find_by_id(&self, id: CircleId) -> TrustResult<Option<Circle>> {
        debug!("Finding circle by id: {}", id);

        let row = sqlx::query_as::<_, CircleRow>(
            "SELECT id, owner_id, name FROM circles WHERE id = ?",
        )
        .bind(id.value())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Circle::from))
    }
}
