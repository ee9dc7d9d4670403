use crate::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_MIGRATIONS_DIR: &str = "./migrations";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("PostgreSQL unreachable: {0}")]
    Unreachable(#[source] sqlx::Error),

    #[error("Timed out waiting for a pooled connection")]
    Timeout,

    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid database settings: {0}")]
    InvalidConfig(String),
}

impl DatabaseError {
    /// Storage cannot be reached at all, as opposed to a failing statement
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DatabaseError::Unreachable(_) | DatabaseError::Timeout)
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DatabaseError::Timeout,
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
                DatabaseError::Unreachable(err)
            }
            other => DatabaseError::Query(other),
        }
    }
}

/// Shared handle used by the health check
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Pool settings derived from config, without connecting
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .test_before_acquire(config.test_before_acquire)
}

/// Connect and make sure the server answers before handing the pool out.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    config.validate().map_err(DatabaseError::InvalidConfig)?;

    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .map_err(DatabaseError::Unreachable)?;
    Database::new(pool.clone()).ping().await?;

    debug!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Connected to PostgreSQL"
    );
    Ok(pool)
}

/// Apply pending migrations from `migrations_path`, or `./migrations`
pub async fn run_migrations(
    pool: &PgPool,
    migrations_path: Option<&Path>,
) -> Result<(), DatabaseError> {
    let path = migrations_path.unwrap_or(Path::new(DEFAULT_MIGRATIONS_DIR));
    let migrator = Migrator::new(path).await?;
    migrator.run(pool).await?;

    info!(
        path = %path.display(),
        known = migrator.iter().count(),
        "Schema up to date"
    );
    Ok(())
}
