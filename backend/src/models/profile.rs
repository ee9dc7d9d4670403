use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Required length of a National Identification Number
pub const NIN_LENGTH: usize = 11;

/// Member profile
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub alternate_phone_number: Option<String>,
    pub email: String,
    pub address: Option<String>,
    pub notable_landmark: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nin: String,
    pub passport_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for registering a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub alternate_phone_number: Option<String>,
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notable_landmark: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub nin: String,
    #[serde(default)]
    pub passport_url: Option<String>,
}

impl NewProfile {
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone_number", &self.phone_number),
            ("email", &self.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required", field));
            }
        }

        if !is_valid_nin(&self.nin) {
            return Err("NIN must be exactly 11 digits.".to_string());
        }

        Ok(())
    }
}

/// Check a National Identification Number
pub fn is_valid_nin(nin: &str) -> bool {
    nin.len() == NIN_LENGTH && nin.bytes().all(|b| b.is_ascii_digit())
}
