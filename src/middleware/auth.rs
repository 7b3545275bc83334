use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::repositories::{SessionRepository, UserRepository};
use crate::session;

/// The authenticated identity for a request, resolved from the device
/// session cookie. The `id` is the opaque stable identifier issued by the
/// external provider.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub display_name: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    SessionRepository: FromRef<S>,
    UserRepository: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session::get_session_token(&jar).ok_or(AppError::Unauthorized)?;

        let session_repo = SessionRepository::from_ref(state);
        let user_id = session_repo
            .find_valid(&token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let user_repo = UserRepository::from_ref(state);
        let user = user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser {
            id: user.id,
            display_name: user.display_name,
        })
    }
}
