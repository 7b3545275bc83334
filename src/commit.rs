//! Turns a finished workout into an immutable history record.

use chrono::{DateTime, Local, Utc};

use crate::error::{AppError, Result};
use crate::models::{WorkoutExercise, WorkoutType};
use crate::repositories::{HistoryRepository, UserRepository};
use crate::streaks;

#[derive(Clone)]
pub struct CommitService {
    history_repo: HistoryRepository,
    user_repo: UserRepository,
}

impl CommitService {
    pub fn new(history_repo: HistoryRepository, user_repo: UserRepository) -> Self {
        Self {
            history_repo,
            user_repo,
        }
    }

    /// Persist a history record and update the owner's streak.
    ///
    /// The duration is recomputed from the wall-clock endpoints; the
    /// client-side elapsed counter can drift across clock suspension and
    /// is never trusted. The history write is the durable source of truth:
    /// a streak failure is logged and swallowed since the streak is a
    /// derived cache that can be recomputed from history.
    #[allow(clippy::too_many_arguments)]
    pub async fn commit(
        &self,
        owner_id: &str,
        routine_id: &str,
        routine_name: &str,
        workout_type: WorkoutType,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        exercises: Vec<WorkoutExercise>,
    ) -> Result<String> {
        let duration_seconds = (ended_at - started_at).num_seconds();
        if duration_seconds < 0 {
            return Err(AppError::InvalidDuration(duration_seconds));
        }

        let record = self
            .history_repo
            .create_record(
                owner_id,
                routine_id,
                routine_name,
                workout_type,
                started_at,
                ended_at,
                duration_seconds,
                &exercises,
            )
            .await
            .map_err(|e| AppError::CommitFailed(e.to_string()))?;

        // Day bucketing follows the workout's start instant, local time.
        let day = started_at.with_timezone(&Local).date_naive();
        if let Err(e) = streaks::record_workout(&self.user_repo, owner_id, day).await {
            tracing::warn!(owner_id, "Streak update failed after commit: {}", e);
        }

        Ok(record.id)
    }
}
