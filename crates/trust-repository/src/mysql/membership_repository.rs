//! MySQL membership repository implementation.

use crate::{
    traits::{MembershipRepository, StoredMembership},
    DatabasePoolInterface,
};
use async_trait::async_trait;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use trust_core::{CircleId, TrustResult};

/// MySQL membership repository.
///
/// Each circle owns one `circle_members` row. Updates and deletes carry the
/// version read by the caller and only apply if it is still current.
#[derive(Component, Clone)]
#[shaku(interface = MembershipRepository)]
pub struct MySqlMembershipRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlMembershipRepository {
    /// Creates a new MySQL membership repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    circle_id: i64,
    members: Vec<u8>,
    version: i64,
}

impl From<MembershipRow> for StoredMembership {
    fn from(row: MembershipRow) -> Self {
        Self {
            circle_id: CircleId::new(row.circle_id),
            members: row.members,
            version: row.version,
        }
    }
}

#[async_trait]
impl MembershipRepository for MySqlMembershipRepository {
    async fn find_by_circle(&self, circle_id: CircleId) -> TrustResult<Option<StoredMembership>> {
        debug!("Loading membership row for circle {}", circle_id);

        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT circle_id, members, version FROM circle_members WHERE circle_id = ?",
        )
        .bind(circle_id.value())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(StoredMembership::from))
    }

    async fn insert(&self, circle_id: CircleId, members: &[u8]) -> TrustResult<bool> {
        debug!("Creating membership row for circle {}", circle_id);

        let result = sqlx::query(
            "INSERT INTO circle_members (circle_id, members, version) VALUES (?, ?, 1)",
        )
        .bind(circle_id.value())
        .bind(members)
        .execute(self.pool.inner())
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        circle_id: CircleId,
        members: &[u8],
        expected_version: i64,
    ) -> TrustResult<bool> {
        debug!(
            "Updating membership row for circle {} at version {}",
            circle_id, expected_version
        );

        let result = sqlx::query(
            r#"
            UPDATE circle_members
            SET members = ?, version = version + 1
            WHERE circle_id = ? AND version = ?
            "#,
        )
        .bind(members)
        .bind(circle_id.value())
        .bind(expected_version)
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, circle_id: CircleId, expected_version: i64) -> TrustResult<bool> {
        debug!(
            "Deleting membership row for circle {} at version {}",
            circle_id, expected_version
        );

        let result =
            sqlx::query("DELETE FROM circle_members WHERE circle_id = ? AND version = ?")
                .bind(circle_id.value())
                .bind(expected_version)
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected() == 1)
    }
}
