use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;

use crate::bootstrap;
use crate::error::Result;
use crate::models::IdentityClaims;
use crate::session;
use crate::state::AppState;

/// Sign-in with an identity payload from the external provider (the
/// server sits behind an authenticating proxy and treats the claims as
/// verified). Upserts the profile, issues a device session cookie, and
/// runs snapshot reconciliation plus the cache warm for this identity.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(claims): Json<IdentityClaims>,
) -> Result<impl IntoResponse> {
    let user = state.user_repo.upsert(&claims).await?;
    let token = state.session_repo.create(&user.id).await?;

    bootstrap::reconcile(&state.workout_store, Some(&user.id));
    bootstrap::warm_cache(&state.routine_repo, &state.history_repo, &user.id).await;

    tracing::info!(user_id = %user.id, "User signed in");

    let jar = jar.add(session::create_session_cookie(&token));
    Ok((jar, Json(user)))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<impl IntoResponse> {
    if let Some(token) = session::get_session_token(&jar) {
        state.session_repo.delete(&token).await?;
    }

    let jar = jar.add(session::remove_session_cookie());
    Ok(jar)
}
