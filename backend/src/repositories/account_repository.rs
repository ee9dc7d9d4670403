use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{Account, AccountStatus};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Repository for payout accounts
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        account_number: &str,
        bank_name: &str,
        status: AccountStatus,
    ) -> RepositoryResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (user_id, account_number, bank_name, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, account_number, bank_name, status, updated_at
            "#,
        )
        .bind(user_id)
        .bind(account_number)
        .bind(bank_name)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, user_id, account_number, bank_name, status, updated_at
            FROM accounts
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> RepositoryResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET status = $2, updated_at = (NOW() AT TIME ZONE 'utc')
            WHERE id = $1
            RETURNING id, user_id, account_number, bank_name, status, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// Replace the bank details and status of an account
    pub async fn update(
        &self,
        id: Uuid,
        account_number: &str,
        bank_name: &str,
        status: AccountStatus,
    ) -> RepositoryResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET account_number = $2, bank_name = $3, status = $4,
                updated_at = (NOW() AT TIME ZONE 'utc')
            WHERE id = $1
            RETURNING id, user_id, account_number, bank_name, status, updated_at
            "#,
        )
        .bind(id)
        .bind(account_number)
        .bind(bank_name)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    /// Number of accounts per status; statuses with no accounts are present with 0
    pub async fn count_by_status(&self) -> RepositoryResult<HashMap<AccountStatus, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM accounts GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts: HashMap<AccountStatus, i64> =
            AccountStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for (status, count) in rows {
            if let Ok(status) = AccountStatus::from_str(&status) {
                counts.insert(status, count);
            }
        }
        Ok(counts)
    }
}
