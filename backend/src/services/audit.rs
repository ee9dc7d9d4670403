use crate::error::{AppError, AppResult};
use crate::models::{Account, Group, Membership, Payment};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: i64,
    pub action: String, // "group_created", "member_joined", "payment_reviewed", ...
    pub group_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub details: serde_json::Value,
}

struct DailyFile {
    date: NaiveDate,
    file: File,
}

/// Append-only JSON-lines trail of admin actions, one file per UTC day
pub struct AuditTrailService {
    log_directory: PathBuf,
    current: Mutex<DailyFile>,
}

impl AuditTrailService {
    /// Create a new audit trail service
    pub fn new(log_directory: PathBuf) -> AppResult<Self> {
        // Ensure directory exists
        std::fs::create_dir_all(&log_directory)
            .map_err(|e| AppError::Message(format!("Failed to create log directory: {}", e)))?;

        let date = Utc::now().date_naive();
        let file = Self::open_for(&log_directory, date)?;

        info!("Audit trail initialized: {:?}", Self::file_name(&log_directory, date));

        Ok(Self {
            log_directory,
            current: Mutex::new(DailyFile { date, file }),
        })
    }

    fn file_name(dir: &Path, date: NaiveDate) -> PathBuf {
        dir.join(format!("audit_{}.log", date.format("%Y-%m-%d")))
    }

    fn open_for(dir: &Path, date: NaiveDate) -> AppResult<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(Self::file_name(dir, date))
            .map_err(|e| AppError::Message(format!("Failed to open audit log file: {}", e)))
    }

    /// Path of the file entries are currently appended to
    pub async fn current_file(&self) -> PathBuf {
        let current = self.current.lock().await;
        Self::file_name(&self.log_directory, current.date)
    }

    /// Log an audit entry
    pub async fn log(&self, entry: AuditLogEntry) -> AppResult<()> {
        let json = serde_json::to_string(&entry)
            .map_err(|e| AppError::Message(format!("Failed to encode audit entry: {}", e)))?;

        let mut current = self.current.lock().await;
        let today = Utc::now().date_naive();
        if current.date != today {
            current.file = Self::open_for(&self.log_directory, today)?;
            current.date = today;
        }

        writeln!(current.file, "{}", json)
            .map_err(|e| AppError::Message(format!("Failed to write audit log: {}", e)))?;

        current
            .file
            .flush()
            .map_err(|e| AppError::Message(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Log without failing the caller; the action already happened
    async fn record(&self, entry: AuditLogEntry) {
        let action = entry.action.clone();
        if let Err(e) = self.log(entry).await {
            warn!(action = %action, "Failed to write audit entry: {}", e);
        }
    }

    /// Log group creation
    pub async fn log_group_created(&self, group: &Group) {
        self.record(AuditLogEntry {
            timestamp: Utc::now().timestamp(),
            action: "group_created".to_string(),
            group_id: Some(group.id),
            subject_id: None,
            details: serde_json::json!({
                "name": group.name,
                "pool_amount": group.pool_amount.to_string(),
                "duration_type": group.duration_type,
                "start_date": group.start_date,
                "end_date": group.end_date,
                "max_slots": group.max_slots,
            }),
        })
        .await
    }

    /// Log a member taking a slot
    pub async fn log_member_joined(&self, membership: &Membership, requested_slot: Option<i32>) {
        self.record(AuditLogEntry {
            timestamp: Utc::now().timestamp(),
            action: "member_joined".to_string(),
            group_id: Some(membership.group_id),
            subject_id: Some(membership.user_id),
            details: serde_json::json!({
                "membership_id": membership.id.to_string(),
                "slot_number": membership.slot_number,
                "manual": requested_slot.is_some(),
            }),
        })
        .await
    }

    /// Log an approve/reject decision on a payment
    pub async fn log_payment_reviewed(&self, payment: &Payment) {
        self.record(AuditLogEntry {
            timestamp: Utc::now().timestamp(),
            action: "payment_reviewed".to_string(),
            group_id: None,
            subject_id: Some(payment.id),
            details: serde_json::json!({
                "group_member_id": payment.group_member_id.to_string(),
                "amount": payment.amount.to_string(),
                "approved": payment.approved,
            }),
        })
        .await
    }

    /// Log an edit of an account's bank details
    pub async fn log_account_updated(&self, account: &Account) {
        self.record(AuditLogEntry {
            timestamp: Utc::now().timestamp(),
            action: "account_updated".to_string(),
            group_id: None,
            subject_id: Some(account.user_id),
            details: serde_json::json!({
                "account_id": account.id.to_string(),
                "bank_name": account.bank_name,
                "status": account.status,
            }),
        })
        .await
    }

    /// Log an account status change
    pub async fn log_account_status_changed(&self, account: &Account) {
        self.record(AuditLogEntry {
            timestamp: Utc::now().timestamp(),
            action: "account_status_changed".to_string(),
            group_id: None,
            subject_id: Some(account.user_id),
            details: serde_json::json!({
                "account_id": account.id.to_string(),
                "status": account.status,
            }),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewMembership;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("osusu-audit-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_entries_are_json_lines() {
        let dir = temp_dir();
        let audit = AuditTrailService::new(dir.clone()).unwrap();

        let membership = Membership::new(NewMembership {
            group_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            slot_number: 3,
        });
        audit.log_member_joined(&membership, None).await;
        audit.log_member_joined(&membership, Some(3)).await;

        let contents = std::fs::read_to_string(audit.current_file().await).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: AuditLogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.action, "member_joined");
        assert_eq!(first.group_id, Some(membership.group_id));
        assert_eq!(first.details["slot_number"], 3);
        assert_eq!(first.details["manual"], false);

        let second: AuditLogEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.details["manual"], true);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_file_named_by_day() {
        let dir = temp_dir();
        let audit = AuditTrailService::new(dir.clone()).unwrap();
        let expected = format!("audit_{}.log", Utc::now().date_naive().format("%Y-%m-%d"));
        let current = audit.current_file().await;
        assert_eq!(current.file_name().unwrap().to_str().unwrap(), expected);
        std::fs::remove_dir_all(dir).ok();
    }
}
