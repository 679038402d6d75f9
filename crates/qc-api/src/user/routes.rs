use axum::{Json, Router, extract::State, routing::get};
use qc_db::repositories::user;
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiState, auth::AuthUser, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/users/me", get(get_me))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_premium: bool,
    pub points: i64,
}

async fn get_me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = user::find_profile_by_id(&state.pool, auth_user.user_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        id: profile.id,
        username: profile.username,
        email: profile.email,
        is_premium: profile.is_premium,
        points: profile.points,
    }))
}
