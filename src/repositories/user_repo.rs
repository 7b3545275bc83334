use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, IdentityClaims, StreakState, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create or refresh a profile row from an external identity payload.
    /// Streak fields are never touched here; only the streak calculator
    /// writes them.
    pub async fn upsert(&self, claims: &IdentityClaims) -> Result<User> {
        let pool = self.pool.clone();
        let claims = claims.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO users (id, display_name, email, photo_url, current_streak, longest_streak, created_at, updated_at)
                 VALUES (?, ?, ?, ?, 0, 0, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET
                     display_name = excluded.display_name,
                     email = excluded.email,
                     photo_url = excluded.photo_url,
                     updated_at = excluded.updated_at",
                rusqlite::params![
                    claims.id,
                    claims.display_name,
                    claims.email,
                    claims.photo_url,
                    now,
                    now
                ],
            )?;

            let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?")?;
            let user = stmt.query_row([&claims.id], User::from_row)?;
            Ok(user)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?")?;
            let result = stmt.query_row([&id], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// The profile's streak fields, as one atomic read.
    pub async fn streak(&self, id: &str) -> Result<Option<StreakState>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let result = conn
                .query_row(
                    "SELECT current_streak, longest_streak, last_workout_date FROM users WHERE id = ?",
                    [&id],
                    |row| {
                        Ok(StreakState {
                            current_streak: row.get(0)?,
                            longest_streak: row.get(1)?,
                            last_workout_date: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn update_streak(
        &self,
        id: &str,
        current_streak: i64,
        longest_streak: i64,
        last_workout_date: NaiveDate,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE users SET current_streak = ?, longest_streak = ?, last_workout_date = ?, updated_at = ?
                 WHERE id = ?",
                rusqlite::params![current_streak, longest_streak, last_workout_date, now, id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
