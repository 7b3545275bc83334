//! The authoritative in-memory workout state machine.
//!
//! One `WorkoutStore` exists per process, owned by the composition root and
//! shared through application state. All mutations are synchronous single
//! state transitions; the only asynchrony is the history commit inside
//! [`WorkoutStore::finish`]. Every mutation is explicitly mirrored to the
//! snapshot store before the call returns, so no state change is ever left
//! unmirrored.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::watch;

use crate::commit::CommitService;
use crate::error::{AppError, Result};
use crate::models::{ActiveWorkout, Routine, SetUpdate, WorkoutExercise, WorkoutProgress, WorkoutSet};
use crate::snapshot::SnapshotStore;

pub struct WorkoutStore {
    workout: Mutex<ActiveWorkout>,
    snapshots: SnapshotStore,
    active_tx: watch::Sender<bool>,
}

impl WorkoutStore {
    pub fn new(snapshots: SnapshotStore) -> Self {
        let (active_tx, _) = watch::channel(false);
        Self {
            workout: Mutex::new(ActiveWorkout::default()),
            snapshots,
            active_tx,
        }
    }

    /// Observe the active flag; used by the timer driver.
    pub fn subscribe_active(&self) -> watch::Receiver<bool> {
        self.active_tx.subscribe()
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// A point-in-time copy of the live workout.
    pub fn state(&self) -> ActiveWorkout {
        self.lock().clone()
    }

    pub fn progress(&self) -> WorkoutProgress {
        self.lock().progress()
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_active
    }

    pub fn restore_attempted(&self) -> bool {
        self.lock().restore_attempted
    }

    /// Latch the restore decision without touching the rest of the state.
    pub fn mark_restore_attempted(&self) {
        let mut workout = self.lock();
        workout.restore_attempted = true;
        self.after_mutation(&workout);
    }

    /// Begin a fresh workout from a routine template. Each routine
    /// exercise's set count expands into that many editable sets seeded
    /// with the routine's reps/weight.
    pub fn start(&self, owner_id: &str, routine: &Routine) -> Result<()> {
        if routine.exercises.is_empty() {
            return Err(AppError::InvalidRoutine(
                "Routine has no exercises".to_string(),
            ));
        }

        let exercises: Vec<WorkoutExercise> = routine
            .exercises
            .iter()
            .map(|exercise| WorkoutExercise {
                exercise_id: exercise.exercise_id.clone(),
                exercise_name: exercise.exercise_name.clone(),
                sets: (0..exercise.sets)
                    .map(|_| WorkoutSet {
                        reps: exercise.reps,
                        weight: exercise.weight,
                        completed: false,
                    })
                    .collect(),
            })
            .collect();

        let mut workout = self.lock();
        let restore_attempted = workout.restore_attempted;
        *workout = ActiveWorkout {
            is_active: true,
            restore_attempted,
            owner_id: Some(owner_id.to_string()),
            routine_id: Some(routine.id.clone()),
            routine_name: Some(routine.name.clone()),
            workout_type: Some(routine.workout_type),
            started_at: Some(Utc::now()),
            elapsed_seconds: 0,
            exercises,
            saving: false,
            last_error: None,
        };
        self.after_mutation(&workout);

        tracing::info!(
            owner_id,
            routine = %routine.name,
            "Started workout"
        );
        Ok(())
    }

    /// Flip the completion flag of one set. Range checking happens under
    /// the same lock as the mutation; returns false when the indices fall
    /// outside the current exercise list.
    pub fn toggle_set(&self, exercise_index: usize, set_index: usize) -> bool {
        let mut workout = self.lock();
        match workout
            .exercises
            .get_mut(exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
        {
            Some(set) => {
                set.completed = !set.completed;
                self.after_mutation(&workout);
                true
            }
            None => false,
        }
    }

    /// Overwrite one field of one set. The store accepts any numeric value
    /// including zero and fractional weight; returns false when the
    /// indices are out of range.
    pub fn update_set(&self, exercise_index: usize, set_index: usize, update: SetUpdate) -> bool {
        let mut workout = self.lock();
        match workout
            .exercises
            .get_mut(exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
        {
            Some(set) => {
                match update {
                    SetUpdate::Reps(reps) => set.reps = reps,
                    SetUpdate::Weight(weight) => set.weight = weight,
                    SetUpdate::Completed(completed) => set.completed = completed,
                }
                self.after_mutation(&workout);
                true
            }
            None => false,
        }
    }

    /// Recompute elapsed time from the absolute start instant. Idempotent
    /// and safe at any cadence; delayed or duplicated ticks cannot drift
    /// because nothing accumulates.
    pub fn tick(&self) {
        let mut workout = self.lock();
        let Some(started_at) = workout.started_at else {
            return;
        };
        if !workout.is_active {
            return;
        }
        workout.elapsed_seconds = (Utc::now() - started_at).num_seconds().max(0);
        self.after_mutation(&workout);
    }

    /// Commit the workout to history and reset to idle.
    ///
    /// On commit failure the session stays active with `last_error` set so
    /// no logged sets are lost; the caller may retry.
    ///
    /// `saving` doubles as a finish-in-flight guard: it is set under the
    /// lock before the commit await, so an overlapping finish is rejected
    /// instead of writing a second history record.
    pub async fn finish(&self, commits: &CommitService) -> Result<String> {
        let (owner_id, routine_id, routine_name, workout_type, started_at, exercises) = {
            let mut workout = self.lock();
            if !workout.is_active {
                return Err(AppError::IncompleteSession(
                    "No active workout to finish".to_string(),
                ));
            }
            if workout.saving {
                return Err(AppError::IncompleteSession(
                    "A finish is already in progress".to_string(),
                ));
            }
            let (Some(owner_id), Some(routine_id), Some(routine_name), Some(workout_type), Some(started_at)) = (
                workout.owner_id.clone(),
                workout.routine_id.clone(),
                workout.routine_name.clone(),
                workout.workout_type,
                workout.started_at,
            ) else {
                return Err(AppError::IncompleteSession(
                    "Workout is missing required fields".to_string(),
                ));
            };

            workout.saving = true;
            workout.last_error = None;
            self.after_mutation(&workout);

            (
                owner_id,
                routine_id,
                routine_name,
                workout_type,
                started_at,
                workout.exercises.clone(),
            )
        };

        let ended_at = Utc::now();
        let result = commits
            .commit(
                &owner_id,
                &routine_id,
                &routine_name,
                workout_type,
                started_at,
                ended_at,
                exercises,
            )
            .await;

        match result {
            Ok(record_id) => {
                let mut workout = self.lock();
                let restore_attempted = workout.restore_attempted;
                *workout = ActiveWorkout {
                    restore_attempted,
                    ..ActiveWorkout::default()
                };
                self.after_mutation(&workout);
                tracing::info!(owner_id, record_id, "Workout committed to history");
                Ok(record_id)
            }
            Err(e) => {
                let mut workout = self.lock();
                workout.saving = false;
                workout.last_error = Some(e.to_string());
                self.after_mutation(&workout);
                Err(e)
            }
        }
    }

    /// Discard the workout without writing history.
    pub fn cancel(&self) {
        let mut workout = self.lock();
        let restore_attempted = workout.restore_attempted;
        *workout = ActiveWorkout {
            restore_attempted,
            ..ActiveWorkout::default()
        };
        self.after_mutation(&workout);
        tracing::info!("Workout cancelled");
    }

    /// Replace the whole state with a persisted snapshot. Used only by
    /// bootstrap reconciliation.
    pub fn restore(&self, snapshot: ActiveWorkout) {
        let mut workout = self.lock();
        *workout = ActiveWorkout {
            restore_attempted: true,
            ..snapshot
        };
        self.after_mutation(&workout);
        tracing::info!(owner_id = ?workout.owner_id, "Restored workout from snapshot");
    }

    fn lock(&self) -> MutexGuard<'_, ActiveWorkout> {
        self.workout.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mirror the committed state and publish the active flag. The mirror
    /// is fire-and-forget relative to the mutation it follows.
    fn after_mutation(&self, workout: &ActiveWorkout) {
        self.snapshots.save(workout);
        self.active_tx.send_replace(workout.is_active);
    }
}
