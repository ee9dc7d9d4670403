use crate::allocator::AllocationError;
use crate::database::DatabaseError;
use crate::models::ScheduleError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// SQLSTATE raised by the capacity trigger when a group is already full
pub const SQLSTATE_GROUP_FULL: &str = "OS001";

/// SQLSTATE raised by the capacity trigger for a slot above `max_slots`
pub const SQLSTATE_SLOT_OUT_OF_RANGE: &str = "OS002";

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database errors
    #[error("SQL error: {0}")]
    Sqlx(#[from] SqlxError),

    /// Slot allocation rejected the join request
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Business logic errors
    #[error("Business logic error: {0}")]
    BusinessLogic(String),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if error is a database connection error
    pub fn is_connection_error(&self) -> bool {
        match self {
            AppError::Database(err) => err.is_unavailable(),
            AppError::Sqlx(err) => matches!(err, SqlxError::PoolTimedOut),
            _ => false,
        }
    }

    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Get HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Allocation(AllocationError::OutOfRange { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Allocation(_) | AppError::BusinessLogic(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Sqlx(_) if self.is_connection_error() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Validation(err.to_string())
    }
}

// Malformed requests answer with the same JSON error body as everything else
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage and internal failures are logged, not echoed to the client
        let message = if status.is_server_error() {
            let error_id = uuid::Uuid::new_v4();
            tracing::error!(error_id = %error_id, "Request failed: {}", self);
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "Storage unavailable".to_string(),
                _ => format!("Internal server error ({})", error_id),
            }
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Duplicate record
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The capacity trigger refused a membership insert
    #[error("Group full: {0}")]
    GroupFull(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AppError::NotFound(msg),
            RepositoryError::Query(e) => AppError::Sqlx(e),
            RepositoryError::Duplicate(msg) => AppError::BusinessLogic(format!("Duplicate: {}", msg)),
            RepositoryError::ConstraintViolation(msg) => AppError::Validation(msg),
            RepositoryError::GroupFull(msg) => AppError::BusinessLogic(msg),
        }
    }
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => RepositoryError::NotFound("Record not found".to_string()),
            SqlxError::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    // Unique violation
                    Some("23505") => RepositoryError::Duplicate(message),
                    // Foreign key / check violation
                    Some("23503") | Some("23514") => RepositoryError::ConstraintViolation(message),
                    Some(SQLSTATE_GROUP_FULL) => RepositoryError::GroupFull(message),
                    Some(SQLSTATE_SLOT_OUT_OF_RANGE) => RepositoryError::ConstraintViolation(message),
                    _ => RepositoryError::Query(err),
                }
            }
            _ => RepositoryError::Query(err),
        }
    }
}

/// Result type alias for repository calls
pub type RepositoryResult<T> = Result<T, RepositoryError>;
