use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{CreateRoutine, FromSqliteRow, Routine, RoutineExercise};

#[derive(Clone)]
pub struct RoutineRepository {
    pool: DbPool,
}

impl RoutineRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, data: CreateRoutine) -> Result<Routine> {
        let pool = self.pool.clone();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let routine = Routine {
            id: id.clone(),
            user_id: user_id.to_string(),
            name: data.name,
            workout_type: data.workout_type,
            intensity: data.intensity,
            estimated_duration: data.estimated_duration,
            exercises: data.exercises,
            created_at: now,
            updated_at: now,
        };
        let exercises_json = encode_exercises(&routine.exercises)?;
        let routine_clone = routine.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO routines (id, user_id, name, workout_type, intensity, estimated_duration, exercises, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    routine_clone.id,
                    routine_clone.user_id,
                    routine_clone.name,
                    routine_clone.workout_type.as_str(),
                    routine_clone.intensity.as_str(),
                    routine_clone.estimated_duration,
                    exercises_json,
                    routine_clone.created_at,
                    routine_clone.updated_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(routine)
    }

    pub async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<Routine>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM routines WHERE id = ? AND user_id = ?")?;
            let result = stmt
                .query_row([&id, &user_id], Routine::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Routine>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM routines WHERE user_id = ? ORDER BY created_at DESC")?;
            let routines = stmt
                .query_map([&user_id], Routine::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(routines)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        name: Option<&str>,
        exercises: Option<&[RoutineExercise]>,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        let name = name.map(|s| s.to_string());
        let exercises_json = exercises.map(encode_exercises).transpose()?;
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut query = String::from("UPDATE routines SET updated_at = ?");
            if name.is_some() {
                query.push_str(", name = ?");
            }
            if exercises_json.is_some() {
                query.push_str(", exercises = ?");
            }
            query.push_str(" WHERE id = ? AND user_id = ?");

            let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(now)];
            if let Some(name) = name {
                params.push(Box::new(name));
            }
            if let Some(exercises_json) = exercises_json {
                params.push(Box::new(exercises_json));
            }
            params.push(Box::new(id));
            params.push(Box::new(user_id));

            let rows = conn.execute(&query, rusqlite::params_from_iter(params.iter()))?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM routines WHERE id = ? AND user_id = ?",
                [&id, &user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn encode_exercises(exercises: &[RoutineExercise]) -> Result<String> {
    serde_json::to_string(exercises).map_err(|e| AppError::Internal(e.to_string()))
}
