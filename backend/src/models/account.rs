use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Standing of a member's account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    Blacklist,
    Deceased,
}

impl AccountStatus {
    pub const ALL: [AccountStatus; 4] = [
        AccountStatus::Active,
        AccountStatus::Inactive,
        AccountStatus::Blacklist,
        AccountStatus::Deceased,
    ];

    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            "blacklist" => Ok(AccountStatus::Blacklist),
            "deceased" => Ok(AccountStatus::Deceased),
            _ => Err(format!("Invalid account status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Blacklist => "blacklist",
            AccountStatus::Deceased => "deceased",
        }
    }
}

/// Payout bank account of a member
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_number: String,
    pub bank_name: String,
    pub status: String,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Get the status as an enum
    pub fn status_enum(&self) -> Option<AccountStatus> {
        AccountStatus::from_str(&self.status).ok()
    }
}
