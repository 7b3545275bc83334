pub mod history;
pub mod routine;
pub mod user;
pub mod workout;

pub use history::HistoryRecord;
pub use routine::{CreateRoutine, Intensity, Routine, RoutineExercise, UpdateRoutine, WorkoutType};
pub use user::{IdentityClaims, StreakState, User};
pub use workout::{
    format_duration, ActiveWorkout, SetUpdate, WorkoutExercise, WorkoutProgress, WorkoutSet,
};

/// Map a rusqlite row onto a model struct.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self>;
}

/// Decode a JSON text column, surfacing parse failures as rusqlite
/// conversion errors so they propagate through the usual query path.
pub(crate) fn json_column<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row,
    column: &str,
) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
