//! Osusu Backend Library
//!
//! Slot allocation and record keeping for rotating savings groups, exposed
//! for the binary and for integration tests.

pub mod allocator;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::create_router;

use database::Database;
use repositories::*;
use services::*;
use std::sync::Arc;

/// Application state containing all repositories and services
pub struct AppState {
    pub database: Database,
    pub group_repo: Arc<GroupRepository>,
    pub membership_repo: Arc<MembershipRepository>,
    pub profile_repo: Arc<ProfileRepository>,
    pub account_repo: Arc<AccountRepository>,
    pub payment_repo: Arc<PaymentRepository>,
    pub audit: Arc<AuditTrailService>,
    pub group_service: Arc<GroupService>,
    pub membership_service: Arc<MembershipService>,
    pub payment_service: Arc<PaymentService>,
    pub profile_service: Arc<ProfileService>,
    pub overview_service: Arc<OverviewService>,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: sqlx::PgPool, audit: Arc<AuditTrailService>) -> Self {
        let database = Database::new(pool.clone());

        let group_repo = Arc::new(GroupRepository::new(pool.clone()));
        let membership_repo = Arc::new(MembershipRepository::new(pool.clone()));
        let profile_repo = Arc::new(ProfileRepository::new(pool.clone()));
        let account_repo = Arc::new(AccountRepository::new(pool.clone()));
        let payment_repo = Arc::new(PaymentRepository::new(pool));

        let group_service = Arc::new(GroupService::new(group_repo.clone(), audit.clone()));
        let membership_service = Arc::new(MembershipService::new(
            group_repo.clone(),
            profile_repo.clone(),
            membership_repo.clone(),
            audit.clone(),
        ));
        let payment_service = Arc::new(PaymentService::new(
            payment_repo.clone(),
            membership_repo.clone(),
            audit.clone(),
        ));
        let profile_service = Arc::new(ProfileService::new(
            profile_repo.clone(),
            account_repo.clone(),
            audit.clone(),
        ));
        let overview_service = Arc::new(OverviewService::new(
            profile_repo.clone(),
            group_repo.clone(),
            account_repo.clone(),
        ));

        Self {
            database,
            group_repo,
            membership_repo,
            profile_repo,
            account_repo,
            payment_repo,
            audit,
            group_service,
            membership_service,
            payment_service,
            profile_service,
            overview_service,
        }
    }
}
