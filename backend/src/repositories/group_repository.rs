use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Group, NewGroup};
use crate::repositories::GroupStore;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const GROUP_COLUMNS: &str =
    "id, name, pool_amount, duration_type, start_date, end_date, max_slots, created_at";

/// Repository for savings group data access
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new GroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new group
    pub async fn create(&self, group: &NewGroup) -> RepositoryResult<Group> {
        sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO groups (name, pool_amount, duration_type, start_date, end_date, max_slots)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(group.name.trim())
        .bind(group.pool_amount)
        .bind(group.duration_type.as_str())
        .bind(group.start_date)
        .bind(group.end_date)
        .bind(group.max_slots)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Find a group by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Group>> {
        sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// All groups, newest first
    pub async fn list(&self) -> RepositoryResult<Vec<Group>> {
        sqlx::query_as::<_, Group>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Groups a user holds at least one slot in
    pub async fn find_by_member(&self, user_id: Uuid) -> RepositoryResult<Vec<Group>> {
        sqlx::query_as::<_, Group>(
            r#"
            SELECT DISTINCT g.id, g.name, g.pool_amount, g.duration_type, g.start_date,
                   g.end_date, g.max_slots, g.created_at
            FROM groups g
            JOIN group_members m ON m.group_id = g.id
            WHERE m.user_id = $1
            ORDER BY g.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Total number of groups
    pub async fn count(&self) -> RepositoryResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM groups")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl GroupStore for GroupRepository {
    async fn find_group(&self, id: Uuid) -> RepositoryResult<Option<Group>> {
        self.find_by_id(id).await
    }
}
