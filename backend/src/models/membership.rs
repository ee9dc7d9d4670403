use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One seat held by a user in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub slot_number: i32,
    pub payment_verified: bool,
    pub joined_at: NaiveDateTime,
}

/// Membership about to be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMembership {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub slot_number: i32,
}

impl Membership {
    /// Build an in-memory membership for a freshly allocated slot
    pub fn new(new: NewMembership) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id: new.group_id,
            user_id: new.user_id,
            slot_number: new.slot_number,
            payment_verified: false,
            joined_at: chrono::Utc::now().naive_utc(),
        }
    }
}
