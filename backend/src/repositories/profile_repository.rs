use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{NewProfile, Profile};
use crate::repositories::ProfileStore;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, first_name, last_name, phone_number, alternate_phone_number, \
     email, address, notable_landmark, date_of_birth, nin, passport_url, created_at";

/// Repository for member profiles
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new profile
    pub async fn create(&self, profile: &NewProfile) -> RepositoryResult<Profile> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (first_name, last_name, phone_number, alternate_phone_number,
                                  email, address, notable_landmark, date_of_birth, nin, passport_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.first_name.trim())
        .bind(profile.last_name.trim())
        .bind(profile.phone_number.trim())
        .bind(profile.alternate_phone_number.as_deref())
        .bind(profile.email.trim())
        .bind(profile.address.as_deref())
        .bind(profile.notable_landmark.as_deref())
        .bind(profile.date_of_birth)
        .bind(&profile.nin)
        .bind(profile.passport_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    /// All profiles, newest first
    pub async fn list(&self) -> RepositoryResult<Vec<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    /// Profiles created at or after `since`
    pub async fn count_created_since(&self, since: NaiveDateTime) -> RepositoryResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn profile_exists(&self, id: Uuid) -> RepositoryResult<bool> {
        let found = sqlx::query_scalar::<_, i32>("SELECT 1 FROM profiles WHERE id = $1 LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }
}
