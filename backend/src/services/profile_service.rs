use crate::error::{AppError, AppResult};
use crate::models::{Account, AccountStatus, NewProfile, Profile};
use crate::repositories::{AccountRepository, ProfileRepository};
use crate::services::AuditTrailService;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Bank account details for a member
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub account_number: String,
    pub bank_name: String,
    #[serde(default)]
    pub status: AccountStatus,
}

impl NewAccount {
    pub fn validate(&self) -> AppResult<()> {
        check_bank_details(&self.account_number, &self.bank_name)
    }
}

/// Full edit of an account; status must be given explicitly
#[derive(Debug, Clone, Deserialize)]
pub struct AccountUpdate {
    pub account_number: String,
    pub bank_name: String,
    pub status: AccountStatus,
}

impl AccountUpdate {
    pub fn validate(&self) -> AppResult<()> {
        check_bank_details(&self.account_number, &self.bank_name)
    }
}

fn check_bank_details(account_number: &str, bank_name: &str) -> AppResult<()> {
    if account_number.trim().is_empty() || bank_name.trim().is_empty() {
        return Err(AppError::Validation("All fields are required.".into()));
    }
    Ok(())
}

/// Service for member profiles and their payout accounts
pub struct ProfileService {
    profile_repo: Arc<ProfileRepository>,
    account_repo: Arc<AccountRepository>,
    audit: Arc<AuditTrailService>,
}

impl ProfileService {
    pub fn new(
        profile_repo: Arc<ProfileRepository>,
        account_repo: Arc<AccountRepository>,
        audit: Arc<AuditTrailService>,
    ) -> Self {
        Self {
            profile_repo,
            account_repo,
            audit,
        }
    }

    pub async fn create_profile(&self, new_profile: NewProfile) -> AppResult<Profile> {
        new_profile.validate().map_err(AppError::Validation)?;

        let profile = self.profile_repo.create(&new_profile).await?;
        info!(user_id = %profile.id, "Registered member {}", profile.full_name());
        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profile_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    pub async fn list_profiles(&self) -> AppResult<Vec<Profile>> {
        Ok(self.profile_repo.list().await?)
    }

    /// Attach a payout account to an existing member
    pub async fn create_account(&self, user_id: Uuid, account: NewAccount) -> AppResult<Account> {
        account.validate()?;
        self.get_profile(user_id).await?;

        let created = self
            .account_repo
            .create(
                user_id,
                account.account_number.trim(),
                account.bank_name.trim(),
                account.status,
            )
            .await?;

        info!(user_id = %user_id, account_id = %created.id, "Account created");
        Ok(created)
    }

    /// Accounts of an existing member, most recently updated first
    pub async fn accounts_of(&self, user_id: Uuid) -> AppResult<Vec<Account>> {
        self.get_profile(user_id).await?;
        Ok(self.account_repo.find_by_user(user_id).await?)
    }

    /// Replace account number, bank and status together
    pub async fn update_account(
        &self,
        account_id: Uuid,
        update: AccountUpdate,
    ) -> AppResult<Account> {
        update.validate()?;

        let account = self
            .account_repo
            .update(
                account_id,
                update.account_number.trim(),
                update.bank_name.trim(),
                update.status,
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", account_id)))?;

        info!(account_id = %account.id, status = %account.status, "Account updated");
        self.audit.log_account_updated(&account).await;
        Ok(account)
    }

    pub async fn update_account_status(
        &self,
        account_id: Uuid,
        status: AccountStatus,
    ) -> AppResult<Account> {
        let account = self
            .account_repo
            .update_status(account_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", account_id)))?;

        self.audit.log_account_status_changed(&account).await;
        Ok(account)
    }
}
