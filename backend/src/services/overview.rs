use crate::error::{AppError, AppResult};
use crate::models::AccountStatus;
use crate::repositories::{AccountRepository, GroupRepository, ProfileRepository};
use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Default look-back window for recent registrations
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Account counts per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountStatusCounts {
    pub active: i64,
    pub inactive: i64,
    pub deceased: i64,
    pub blacklist: i64,
}

/// Dashboard headline figures
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_profiles: i64,
    pub total_groups: i64,
    pub total_accounts: i64,
    pub account_status: AccountStatusCounts,
    pub window_days: i64,
    pub recent_registrations: i64,
}

pub struct OverviewService {
    profile_repo: Arc<ProfileRepository>,
    group_repo: Arc<GroupRepository>,
    account_repo: Arc<AccountRepository>,
}

impl OverviewService {
    pub fn new(
        profile_repo: Arc<ProfileRepository>,
        group_repo: Arc<GroupRepository>,
        account_repo: Arc<AccountRepository>,
    ) -> Self {
        Self {
            profile_repo,
            group_repo,
            account_repo,
        }
    }

    pub async fn overview(&self, window_days: Option<i64>) -> AppResult<Overview> {
        let window_days = window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        if !(1..=365).contains(&window_days) {
            return Err(AppError::Validation("days must be between 1 and 365".into()));
        }
        let since = Utc::now().naive_utc() - Duration::days(window_days);

        let by_status = self.account_repo.count_by_status().await?;
        let count = |status: AccountStatus| by_status.get(&status).copied().unwrap_or(0);

        Ok(Overview {
            total_profiles: self.profile_repo.count().await?,
            total_groups: self.group_repo.count().await?,
            total_accounts: self.account_repo.count().await?,
            account_status: AccountStatusCounts {
                active: count(AccountStatus::Active),
                inactive: count(AccountStatus::Inactive),
                deceased: count(AccountStatus::Deceased),
                blacklist: count(AccountStatus::Blacklist),
            },
            window_days,
            recent_registrations: self.profile_repo.count_created_since(since).await?,
        })
    }
}
