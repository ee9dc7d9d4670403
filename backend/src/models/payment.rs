//! Contributions paid against a membership

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review state shown to members and admins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    AwaitingApproval,
    Pending,
    Unknown,
}

impl PaymentStatus {
    /// Derive the status from the approval flag and proof of transfer
    pub fn derive(approved: bool, screenshot_url: Option<&str>) -> Self {
        let has_proof = screenshot_url.is_some_and(|url| !url.is_empty());
        match (approved, has_proof) {
            (true, true) => PaymentStatus::Paid,
            (false, true) => PaymentStatus::AwaitingApproval,
            (false, false) => PaymentStatus::Pending,
            (true, false) => PaymentStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub group_member_id: Uuid,
    pub amount: Decimal,
    pub screenshot_url: Option<String>,
    pub approved: bool,
    pub paid_at: NaiveDateTime,
    pub due_date: NaiveDate,
}

impl Payment {
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::derive(self.approved, self.screenshot_url.as_deref())
    }
}

/// Aggregate figures for the payments dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStats {
    pub total_payments: i64,
    pub approved_payments: i64,
    pub pending_payments: i64,
    pub total_amount: Decimal,
}

impl PaymentStats {
    /// Share of approved payments, rounded to a whole percent
    pub fn approval_rate(&self) -> Option<i64> {
        if self.total_payments == 0 {
            return None;
        }
        Some(((self.approved_payments as f64 / self.total_payments as f64) * 100.0).round() as i64)
    }
}
