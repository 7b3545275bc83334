use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{json_column, FromSqliteRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    FullBody,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Push => "Push",
            WorkoutType::Pull => "Pull",
            WorkoutType::Legs => "Legs",
            WorkoutType::Upper => "Upper",
            WorkoutType::Lower => "Lower",
            WorkoutType::FullBody => "FullBody",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Push" => Some(WorkoutType::Push),
            "Pull" => Some(WorkoutType::Pull),
            "Legs" => Some(WorkoutType::Legs),
            "Upper" => Some(WorkoutType::Upper),
            "Lower" => Some(WorkoutType::Lower),
            "FullBody" => Some(WorkoutType::FullBody),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Heavy,
    Medium,
    Light,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Heavy => "Heavy",
            Intensity::Medium => "Medium",
            Intensity::Light => "Light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Heavy" => Some(Intensity::Heavy),
            "Medium" => Some(Intensity::Medium),
            "Light" => Some(Intensity::Light),
            _ => None,
        }
    }
}

/// One exercise line of a routine template: how many sets to perform and
/// the default reps/weight each set starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: i64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub workout_type: WorkoutType,
    pub intensity: Intensity,
    /// Estimated duration in minutes.
    pub estimated_duration: i64,
    pub exercises: Vec<RoutineExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for Routine {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let workout_type: String = row.get("workout_type")?;
        let intensity: String = row.get("intensity")?;
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            workout_type: WorkoutType::parse(&workout_type).ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(
                    0,
                    "workout_type".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?,
            intensity: Intensity::parse(&intensity).ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(
                    0,
                    "intensity".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?,
            estimated_duration: row.get("estimated_duration")?,
            exercises: json_column(row, "exercises")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRoutine {
    pub name: String,
    pub workout_type: WorkoutType,
    pub intensity: Intensity,
    pub estimated_duration: i64,
    pub exercises: Vec<RoutineExercise>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoutine {
    pub name: Option<String>,
    pub exercises: Option<Vec<RoutineExercise>>,
}
