use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateRoutine, Routine, UpdateRoutine};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Routine>>> {
    let routines = state.routine_repo.find_by_user(&auth_user.id).await?;
    Ok(Json(routines))
}

pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(payload): Json<CreateRoutine>,
) -> Result<(StatusCode, Json<Routine>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Routine name is required".to_string()));
    }

    let routine = state.routine_repo.create(&auth_user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(routine)))
}

pub async fn show(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Routine>> {
    let routine = state
        .routine_repo
        .find_by_id(&id, &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Routine not found".to_string()))?;
    Ok(Json(routine))
}

pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoutine>,
) -> Result<Json<Routine>> {
    let updated = state
        .routine_repo
        .update(
            &id,
            &auth_user.id,
            payload.name.as_deref(),
            payload.exercises.as_deref(),
        )
        .await?;

    if !updated {
        return Err(AppError::NotFound("Routine not found".to_string()));
    }

    let routine = state
        .routine_repo
        .find_by_id(&id, &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Routine not found".to_string()))?;
    Ok(Json(routine))
}

pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let deleted = state.routine_repo.delete(&id, &auth_user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Routine not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
