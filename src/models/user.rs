use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_workout_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            display_name: row.get("display_name")?,
            email: row.get("email")?,
            photo_url: row.get("photo_url")?,
            current_streak: row.get("current_streak")?,
            longest_streak: row.get("longest_streak")?,
            last_workout_date: row.get("last_workout_date")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Identity payload reported by the external provider. The `id` is an
/// opaque stable string; profile fields are display-only.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// The streak fields of a profile, read and written only by the streak
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_workout_date: Option<NaiveDate>,
}
