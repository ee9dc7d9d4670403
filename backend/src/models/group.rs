use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Exact length of a weekly cycle, in days
pub const WEEKLY_CYCLE_DAYS: i64 = 7;

/// Minimum length of a monthly cycle, in days
pub const MONTHLY_MIN_CYCLE_DAYS: i64 = 29;

/// Largest seat count a group may be created with
pub const MAX_GROUP_SLOTS: i32 = 1_000;

/// Contribution schedule of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationType {
    Weekly,
    Monthly,
}

/// Rejected group definitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("All fields are required: {0}")]
    MissingField(&'static str),

    #[error("For weekly, the duration must be exactly 7 days.")]
    WeeklyWindow { days: i64 },

    #[error("For monthly, the duration must be at least 29 days.")]
    MonthlyWindow { days: i64 },

    #[error("Pool amount must be greater than zero")]
    NonPositivePool,

    #[error("Max slots must be at least 1")]
    NonPositiveSlots,

    #[error("Max slots must not exceed {max}")]
    TooManySlots { max: i32 },
}

impl DurationType {
    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationType::Weekly => "weekly",
            DurationType::Monthly => "monthly",
        }
    }

    /// Check that `start..end` is a valid cycle for this schedule
    pub fn validate_window(&self, start: NaiveDate, end: NaiveDate) -> Result<(), ScheduleError> {
        let days = (end - start).num_days();
        match self {
            DurationType::Weekly if days != WEEKLY_CYCLE_DAYS => {
                Err(ScheduleError::WeeklyWindow { days })
            }
            DurationType::Monthly if days < MONTHLY_MIN_CYCLE_DAYS => {
                Err(ScheduleError::MonthlyWindow { days })
            }
            _ => Ok(()),
        }
    }
}

/// Savings group with a fixed number of slots
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub pool_amount: Decimal,
    pub duration_type: String, // "weekly" | "monthly"
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_slots: i32,
    pub created_at: NaiveDateTime,
}

/// Input for creating a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub pool_amount: Decimal,
    pub duration_type: DurationType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_slots: i32,
}

impl NewGroup {
    /// Validate required fields and the cycle window
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.name.trim().is_empty() {
            return Err(ScheduleError::MissingField("name"));
        }
        if self.pool_amount <= Decimal::ZERO {
            return Err(ScheduleError::NonPositivePool);
        }
        if self.max_slots < 1 {
            return Err(ScheduleError::NonPositiveSlots);
        }
        if self.max_slots > MAX_GROUP_SLOTS {
            return Err(ScheduleError::TooManySlots {
                max: MAX_GROUP_SLOTS,
            });
        }
        self.duration_type
            .validate_window(self.start_date, self.end_date)
    }
}
