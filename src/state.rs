use std::sync::Arc;

use axum::extract::FromRef;

use crate::commit::CommitService;
use crate::repositories::{HistoryRepository, RoutineRepository, SessionRepository, UserRepository};
use crate::store::WorkoutStore;

/// Application state shared by every handler. Cloning is cheap: repos hold
/// a pooled handle and the workout store is behind an `Arc`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
    pub routine_repo: RoutineRepository,
    pub history_repo: HistoryRepository,
    pub workout_store: Arc<WorkoutStore>,
    pub commits: CommitService,
}
