use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::routine::WorkoutType;

/// One set of an exercise in the live workout. `reps` and `weight` start
/// from the routine's configured values and are editable in place;
/// `completed` is the per-set check-off flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub reps: i64,
    pub weight: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: Vec<WorkoutSet>,
}

/// The live workout state machine. At most one exists per device.
///
/// Invariant: `is_active` holds exactly when `started_at` is set and
/// `exercises` is non-empty. When inactive, every field equals its
/// `Default` value — the reset contract shared by finish and cancel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveWorkout {
    pub is_active: bool,
    pub restore_attempted: bool,
    pub owner_id: Option<String>,
    pub routine_id: Option<String>,
    pub routine_name: Option<String>,
    pub workout_type: Option<WorkoutType>,
    pub started_at: Option<DateTime<Utc>>,
    /// Derived from `now - started_at` on each tick; never a source of truth.
    pub elapsed_seconds: i64,
    pub exercises: Vec<WorkoutExercise>,
    pub saving: bool,
    pub last_error: Option<String>,
}

impl ActiveWorkout {
    /// Completion progress over all sets. Pure and division-by-zero safe.
    pub fn progress(&self) -> WorkoutProgress {
        let mut completed_sets = 0u32;
        let mut total_sets = 0u32;

        for exercise in &self.exercises {
            for set in &exercise.sets {
                total_sets += 1;
                if set.completed {
                    completed_sets += 1;
                }
            }
        }

        let percentage = if total_sets > 0 {
            100.0 * f64::from(completed_sets) / f64::from(total_sets)
        } else {
            0.0
        };

        WorkoutProgress {
            completed_sets,
            total_sets,
            percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkoutProgress {
    pub completed_sets: u32,
    pub total_sets: u32,
    pub percentage: f64,
}

/// A single-field edit to one set, as submitted by the UI.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SetUpdate {
    Reps(i64),
    Weight(f64),
    Completed(bool),
}

/// Render a second count as `h:mm:ss`, or `m:ss` under an hour.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(flags: &[bool]) -> WorkoutExercise {
        WorkoutExercise {
            exercise_id: "ex-1".to_string(),
            exercise_name: "Bench Press".to_string(),
            sets: flags
                .iter()
                .map(|&completed| WorkoutSet {
                    reps: 8,
                    weight: 60.0,
                    completed,
                })
                .collect(),
        }
    }

    #[test]
    fn progress_counts_sets_across_exercises() {
        let workout = ActiveWorkout {
            exercises: vec![exercise(&[true, false, false]), exercise(&[true, true])],
            ..Default::default()
        };

        let progress = workout.progress();
        assert_eq!(progress.completed_sets, 3);
        assert_eq!(progress.total_sets, 5);
        assert!((progress.percentage - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_zero_without_sets() {
        let progress = ActiveWorkout::default().progress();
        assert_eq!(progress.total_sets, 0);
        assert_eq!(progress.percentage, 0.0);
    }

    #[test]
    fn progress_hits_one_hundred_only_when_all_complete() {
        let all_done = ActiveWorkout {
            exercises: vec![exercise(&[true, true])],
            ..Default::default()
        };
        assert_eq!(all_done.progress().percentage, 100.0);

        let one_left = ActiveWorkout {
            exercises: vec![exercise(&[true, false])],
            ..Default::default()
        };
        assert!(one_left.progress().percentage < 100.0);
    }

    #[test]
    fn format_duration_under_an_hour() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(754), "12:34");
    }

    #[test]
    fn format_duration_with_hours() {
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3661), "1:01:01");
    }
}
