//! Consecutive-day streaks and daily/weekly aggregates derived from the
//! history collection.
//!
//! Day and window bucketing are keyed on each workout's start instant in
//! local time, applied the same way for streaks and stats so a workout can
//! never count toward one day for the calendar and another for the streak.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::Serialize;

use crate::error::Result;
use crate::models::{HistoryRecord, StreakState};
use crate::repositories::{HistoryRepository, UserRepository};

/// Advance a streak for a workout on `today`. Returns `None` when nothing
/// changes (a second workout on an already-counted day).
pub fn advance(streak: StreakState, today: NaiveDate) -> Option<StreakState> {
    let current = match streak.last_workout_date {
        Some(last) if last == today => return None,
        Some(last) if last == today - Duration::days(1) => streak.current_streak + 1,
        _ => 1,
    };

    Some(StreakState {
        current_streak: current,
        longest_streak: streak.longest_streak.max(current),
        last_workout_date: Some(today),
    })
}

/// Record that `user_id` worked out on `day` and persist the new streak.
/// Idempotent per calendar day.
pub async fn record_workout(users: &UserRepository, user_id: &str, day: NaiveDate) -> Result<()> {
    let Some(streak) = users.streak(user_id).await? else {
        tracing::warn!(user_id, "Streak update skipped: no such profile");
        return Ok(());
    };

    let Some(updated) = advance(streak, day) else {
        tracing::debug!(user_id, "Streak unchanged: already counted today");
        return Ok(());
    };

    users
        .update_streak(
            user_id,
            updated.current_streak,
            updated.longest_streak,
            day,
        )
        .await?;

    tracing::debug!(
        user_id,
        current = updated.current_streak,
        longest = updated.longest_streak,
        "Streak updated"
    );
    Ok(())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyStats {
    pub total_volume: f64,
    pub total_sets: i64,
    pub total_reps: i64,
    pub workout_count: i64,
    /// Distinct calendar days with at least one workout, newest first.
    pub workout_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyStats {
    pub total_volume: f64,
    pub total_sets: i64,
    pub total_reps: i64,
    pub workout_count: i64,
    pub date: NaiveDate,
}

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day.week(Weekday::Mon).first_day()
}

/// Aggregates over the week beginning at `week_start` (Monday, local time).
pub async fn weekly_stats(
    history: &HistoryRepository,
    user_id: &str,
    week_start: NaiveDate,
) -> Result<WeeklyStats> {
    let start = local_midnight(week_start);
    let end = local_midnight(week_start + Duration::days(7));
    let records = history.find_started_between(user_id, start, end).await?;

    let mut stats = WeeklyStats {
        total_volume: 0.0,
        total_sets: 0,
        total_reps: 0,
        workout_count: records.len() as i64,
        workout_dates: Vec::new(),
    };

    for record in &records {
        let day = record.started_at.with_timezone(&Local).date_naive();
        if !stats.workout_dates.contains(&day) {
            stats.workout_dates.push(day);
        }
        fold_completed_sets(
            record,
            &mut stats.total_volume,
            &mut stats.total_sets,
            &mut stats.total_reps,
        );
    }

    stats.total_volume = stats.total_volume.round();
    Ok(stats)
}

/// Aggregates over one calendar day (local time).
pub async fn daily_stats(
    history: &HistoryRepository,
    user_id: &str,
    day: NaiveDate,
) -> Result<DailyStats> {
    let start = local_midnight(day);
    let end = local_midnight(day + Duration::days(1));
    let records = history.find_started_between(user_id, start, end).await?;

    let mut stats = DailyStats {
        total_volume: 0.0,
        total_sets: 0,
        total_reps: 0,
        workout_count: records.len() as i64,
        date: day,
    };

    for record in &records {
        fold_completed_sets(
            record,
            &mut stats.total_volume,
            &mut stats.total_sets,
            &mut stats.total_reps,
        );
    }

    stats.total_volume = stats.total_volume.round();
    Ok(stats)
}

/// Volume, set, and rep totals count only sets the user checked off;
/// `workout_count` counts records regardless.
fn fold_completed_sets(
    record: &HistoryRecord,
    total_volume: &mut f64,
    total_sets: &mut i64,
    total_reps: &mut i64,
) {
    for exercise in &record.exercises {
        for set in &exercise.sets {
            if set.completed {
                *total_sets += 1;
                *total_reps += set.reps;
                *total_volume += set.weight * set.reps as f64;
            }
        }
    }
}

fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // Midnight skipped by a DST transition; treat the naive instant
        // as UTC rather than failing the whole query.
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}
