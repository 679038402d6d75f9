use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use uuid::Uuid;

use super::jwt::verify_jwt_token;
use crate::{error::ApiError, state::AuthConfig};

/// Name of the encrypted cookie holding the session JWT.
pub const AUTH_COOKIE: &str = "auth_token";

/// Authenticated user extractor
///
/// Handlers taking an `AuthUser` only run for requests carrying a valid token, and
/// every repository call they make is scoped to `user_id`.
///
/// # Example
/// ```
/// use axum::extract::State;
/// use qc_api::{error::ApiError, auth::AuthUser, ApiState};
///
/// async fn protected_route(
///     auth_user: AuthUser,
///     State(state): State<ApiState>,
/// ) -> Result<(), ApiError> {
///     let _ = auth_user.user_id;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);

        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Auth("Failed to read cookies".to_string()))?;

        let token = jar
            .get(AUTH_COOKIE)
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?
            .value()
            .to_owned();

        let claims = verify_jwt_token(&token, &auth_config.jwt_secret)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Auth("Invalid user ID in token".to_string()))?;

        tracing::Span::current().record("user_id", tracing::field::display(user_id));

        Ok(AuthUser { user_id })
    }
}
