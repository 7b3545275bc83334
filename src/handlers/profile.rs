use axum::{extract::State, Json};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::User;
use crate::state::AppState;

/// The signed-in profile, including the streak aggregate. Streak fields
/// are written only by the streak calculator; this surface is read-only.
pub async fn show(State(state): State<AppState>, auth_user: AuthUser) -> Result<Json<User>> {
    let user = state
        .user_repo
        .find_by_id(&auth_user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(user))
}
