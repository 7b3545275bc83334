use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::bootstrap;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{format_duration, ActiveWorkout, SetUpdate, WorkoutProgress};
use crate::state::AppState;

#[derive(Serialize)]
pub struct WorkoutView {
    #[serde(flatten)]
    pub workout: ActiveWorkout,
    pub progress: WorkoutProgress,
    pub elapsed_display: String,
}

fn view(workout: ActiveWorkout) -> WorkoutView {
    let progress = workout.progress();
    let elapsed_display = format_duration(workout.elapsed_seconds);
    WorkoutView {
        workout,
        progress,
        elapsed_display,
    }
}

/// The live session belongs to whoever started it; other identities may
/// neither see nor mutate it.
fn ensure_owner(state: &AppState, auth_user: &AuthUser) -> Result<()> {
    let workout = state.workout_store.state();
    if workout.is_active && workout.owner_id.as_deref() != Some(auth_user.id.as_str()) {
        return Err(AppError::Forbidden(
            "Another user's workout is in progress".to_string(),
        ));
    }
    Ok(())
}

pub async fn show(State(state): State<AppState>, auth_user: AuthUser) -> Result<Json<WorkoutView>> {
    bootstrap::reconcile(&state.workout_store, Some(&auth_user.id));
    ensure_owner(&state, &auth_user)?;
    Ok(Json(view(state.workout_store.state())))
}

#[derive(Deserialize)]
pub struct StartWorkout {
    pub routine_id: String,
}

pub async fn start(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(payload): Json<StartWorkout>,
) -> Result<Json<WorkoutView>> {
    bootstrap::reconcile(&state.workout_store, Some(&auth_user.id));
    ensure_owner(&state, &auth_user)?;

    let routine = state
        .routine_repo
        .find_by_id(&payload.routine_id, &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Routine not found".to_string()))?;

    state.workout_store.start(&auth_user.id, &routine)?;
    Ok(Json(view(state.workout_store.state())))
}

#[derive(Deserialize)]
pub struct SetRef {
    pub exercise_index: usize,
    pub set_index: usize,
}

pub async fn toggle_set(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(set_ref): Json<SetRef>,
) -> Result<Json<WorkoutView>> {
    ensure_owner(&state, &auth_user)?;

    // The store checks the indices under the same lock as the mutation,
    // so a concurrent cancel cannot slip between validation and edit.
    if !state
        .workout_store
        .toggle_set(set_ref.exercise_index, set_ref.set_index)
    {
        return Err(AppError::BadRequest("Set index out of range".to_string()));
    }
    Ok(Json(view(state.workout_store.state())))
}

#[derive(Deserialize)]
pub struct UpdateSet {
    #[serde(flatten)]
    pub set_ref: SetRef,
    #[serde(flatten)]
    pub update: SetUpdate,
}

pub async fn update_set(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(payload): Json<UpdateSet>,
) -> Result<Json<WorkoutView>> {
    ensure_owner(&state, &auth_user)?;

    if !state.workout_store.update_set(
        payload.set_ref.exercise_index,
        payload.set_ref.set_index,
        payload.update,
    ) {
        return Err(AppError::BadRequest("Set index out of range".to_string()));
    }
    Ok(Json(view(state.workout_store.state())))
}

pub async fn finish(State(state): State<AppState>, auth_user: AuthUser) -> Result<Json<Value>> {
    ensure_owner(&state, &auth_user)?;

    let record_id = state.workout_store.finish(&state.commits).await?;
    Ok(Json(json!({ "id": record_id })))
}

pub async fn cancel(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<WorkoutView>> {
    ensure_owner(&state, &auth_user)?;

    state.workout_store.cancel();
    Ok(Json(view(state.workout_store.state())))
}
