use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Membership, NewMembership};
use crate::repositories::MembershipStore;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for group membership (slot) data access
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Create a new MembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a membership for an already allocated slot.
    ///
    /// The `(group_id, slot_number)` unique constraint surfaces as
    /// [`RepositoryError::Duplicate`]; the capacity trigger surfaces as
    /// [`RepositoryError::GroupFull`].
    pub async fn add_member(&self, new: &NewMembership) -> RepositoryResult<Membership> {
        sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO group_members (group_id, user_id, slot_number)
            VALUES ($1, $2, $3)
            RETURNING id, group_id, user_id, slot_number, payment_verified, joined_at
            "#,
        )
        .bind(new.group_id)
        .bind(new.user_id)
        .bind(new.slot_number)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Slot numbers currently assigned in a group
    pub async fn slot_numbers(&self, group_id: Uuid) -> RepositoryResult<Vec<i32>> {
        sqlx::query_scalar::<_, i32>(
            r#"
            SELECT slot_number
            FROM group_members
            WHERE group_id = $1
            ORDER BY slot_number ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Find a membership by id
    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, group_id, user_id, slot_number, payment_verified, joined_at
            FROM group_members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// All memberships of a group, by slot
    pub async fn find_by_group(&self, group_id: Uuid) -> RepositoryResult<Vec<Membership>> {
        sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, group_id, user_id, slot_number, payment_verified, joined_at
            FROM group_members
            WHERE group_id = $1
            ORDER BY slot_number ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// All memberships of a user, newest first
    pub async fn find_by_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Membership>> {
        sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, group_id, user_id, slot_number, payment_verified, joined_at
            FROM group_members
            WHERE user_id = $1
            ORDER BY joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Flip the payment-verified flag
    pub async fn set_payment_verified(
        &self,
        id: Uuid,
        verified: bool,
    ) -> RepositoryResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            r#"
            UPDATE group_members
            SET payment_verified = $2
            WHERE id = $1
            RETURNING id, group_id, user_id, slot_number, payment_verified, joined_at
            "#,
        )
        .bind(id)
        .bind(verified)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl MembershipStore for MembershipRepository {
    async fn assigned_slots(&self, group_id: Uuid) -> RepositoryResult<Vec<i32>> {
        self.slot_numbers(group_id).await
    }

    async fn insert_membership(&self, new: &NewMembership) -> RepositoryResult<Membership> {
        self.add_member(new).await
    }

    async fn group_memberships(&self, group_id: Uuid) -> RepositoryResult<Vec<Membership>> {
        self.find_by_group(group_id).await
    }

    async fn user_memberships(&self, user_id: Uuid) -> RepositoryResult<Vec<Membership>> {
        self.find_by_user(user_id).await
    }

    async fn mark_payment_verified(
        &self,
        id: Uuid,
        verified: bool,
    ) -> RepositoryResult<Option<Membership>> {
        self.set_payment_verified(id, verified).await
    }
}
