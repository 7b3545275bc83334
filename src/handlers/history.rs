use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{HistoryRecord, WorkoutType};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub workout_type: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<HistoryRecord>>> {
    let workout_type = match query.workout_type.as_deref() {
        Some(raw) => Some(
            WorkoutType::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown workout type: {}", raw)))?,
        ),
        None => None,
    };

    let records = state
        .history_repo
        .find_by_user(&auth_user.id, workout_type)
        .await?;
    Ok(Json(records))
}

#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

pub async fn recent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<HistoryRecord>>> {
    let limit = query.limit.unwrap_or(5).clamp(1, 50);
    let records = state.history_repo.find_recent(&auth_user.id, limit).await?;
    Ok(Json(records))
}

pub async fn show(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<HistoryRecord>> {
    let record = state
        .history_repo
        .find_by_id(&id, &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    Ok(Json(record))
}
