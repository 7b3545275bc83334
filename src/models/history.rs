use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::routine::WorkoutType;
use super::workout::WorkoutExercise;
use super::{json_column, FromSqliteRow};

/// An immutable, completed workout log entry.
///
/// `duration_seconds` is recomputed from the wall-clock endpoints at commit
/// time rather than trusted from the client-side elapsed counter.
/// `created_at` is assigned at write time by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub user_id: String,
    pub routine_id: String,
    pub routine_name: String,
    pub workout_type: WorkoutType,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub exercises: Vec<WorkoutExercise>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for HistoryRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let workout_type: String = row.get("workout_type")?;
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            routine_id: row.get("routine_id")?,
            routine_name: row.get("routine_name")?,
            workout_type: WorkoutType::parse(&workout_type).ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(
                    0,
                    "workout_type".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?,
            started_at: row.get("started_at")?,
            ended_at: row.get("ended_at")?,
            duration_seconds: row.get("duration_seconds")?,
            exercises: json_column(row, "exercises")?,
            created_at: row.get("created_at")?,
        })
    }
}
