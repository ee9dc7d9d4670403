use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Payment, PaymentStats};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const PAYMENT_COLUMNS: &str = "id, group_member_id, amount, screenshot_url, approved, paid_at, due_date";

/// Repository for contribution payments
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a submitted payment; always starts unapproved
    pub async fn create(
        &self,
        group_member_id: Uuid,
        amount: Decimal,
        screenshot_url: &str,
        due_date: NaiveDate,
    ) -> RepositoryResult<Payment> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (group_member_id, amount, screenshot_url, approved, due_date)
            VALUES ($1, $2, $3, FALSE, $4)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(group_member_id)
        .bind(amount)
        .bind(screenshot_url)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Set the approval flag
    pub async fn set_approved(&self, id: Uuid, approved: bool) -> RepositoryResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments SET approved = $2 WHERE id = $1 RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Payments for a set of memberships, newest first
    pub async fn find_by_memberships(&self, member_ids: &[Uuid]) -> RepositoryResult<Vec<Payment>> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE group_member_id = ANY($1)
            ORDER BY paid_at DESC
            "#
        ))
        .bind(member_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Totals across every payment
    pub async fn stats(&self) -> RepositoryResult<PaymentStats> {
        let (total, approved, amount) = sqlx::query_as::<_, (i64, i64, Decimal)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE approved),
                   COALESCE(SUM(amount), 0)
            FROM payments
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PaymentStats {
            total_payments: total,
            approved_payments: approved,
            pending_payments: total - approved,
            total_amount: amount,
        })
    }
}
