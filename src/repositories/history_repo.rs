use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, HistoryRecord, WorkoutExercise, WorkoutType};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: DbPool,
}

impl HistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Write an immutable history record. `created_at` is assigned here,
    /// at write time; rows are never updated afterwards.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_record(
        &self,
        user_id: &str,
        routine_id: &str,
        routine_name: &str,
        workout_type: WorkoutType,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        duration_seconds: i64,
        exercises: &[WorkoutExercise],
    ) -> Result<HistoryRecord> {
        let pool = self.pool.clone();
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        let record = HistoryRecord {
            id: id.clone(),
            user_id: user_id.to_string(),
            routine_id: routine_id.to_string(),
            routine_name: routine_name.to_string(),
            workout_type,
            started_at,
            ended_at,
            duration_seconds,
            exercises: exercises.to_vec(),
            created_at,
        };
        let exercises_json =
            serde_json::to_string(exercises).map_err(|e| AppError::Internal(e.to_string()))?;
        let record_clone = record.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workout_history (id, user_id, routine_id, routine_name, workout_type, started_at, ended_at, duration_seconds, exercises, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    record_clone.id,
                    record_clone.user_id,
                    record_clone.routine_id,
                    record_clone.routine_name,
                    record_clone.workout_type.as_str(),
                    record_clone.started_at,
                    record_clone.ended_at,
                    record_clone.duration_seconds,
                    exercises_json,
                    record_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<HistoryRecord>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM workout_history WHERE id = ? AND user_id = ?")?;
            let result = stmt
                .query_row([&id, &user_id], HistoryRecord::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Newest-first history for a user, optionally filtered by workout type.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        workout_type: Option<WorkoutType>,
    ) -> Result<Vec<HistoryRecord>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let records = match workout_type {
                Some(workout_type) => {
                    let mut stmt = conn.prepare(
                        "SELECT * FROM workout_history
                         WHERE user_id = ? AND workout_type = ?
                         ORDER BY started_at DESC",
                    )?;
                    let records = stmt
                        .query_map(
                            rusqlite::params![user_id, workout_type.as_str()],
                            HistoryRecord::from_row,
                        )?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    records
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT * FROM workout_history WHERE user_id = ? ORDER BY started_at DESC",
                    )?;
                    let records = stmt
                        .query_map([&user_id], HistoryRecord::from_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    records
                }
            };
            Ok(records)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_recent(&self, user_id: &str, limit: i64) -> Result<Vec<HistoryRecord>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM workout_history WHERE user_id = ? ORDER BY started_at DESC LIMIT ?",
            )?;
            let records = stmt
                .query_map(
                    rusqlite::params![user_id, limit],
                    HistoryRecord::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Records whose workout started within `[start, end)`, newest first.
    /// Windows are keyed on `started_at` so a commit that crosses midnight
    /// still lands on the day the workout began.
    pub async fn find_started_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HistoryRecord>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM workout_history
                 WHERE user_id = ? AND started_at >= ? AND started_at < ?
                 ORDER BY started_at DESC",
            )?;
            let records = stmt
                .query_map(
                    rusqlite::params![user_id, start, end],
                    HistoryRecord::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
