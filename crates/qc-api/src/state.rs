use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use qc_engine::Engine;
use sqlx::PgPool;

use crate::{ApiConfig, config::Environment};

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub jwt_secret: String,
    pub cookie_key: Key,
    pub environment: Environment,
    pub engine: Engine,
    pub free_flashcard_limit: i64,
}

impl ApiState {
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            cookie_key: Key::from(config.cookie_secret.as_bytes()),
            environment: config.env.clone(),
            engine: Engine::new(config.scoring()),
            free_flashcard_limit: config.free_flashcard_limit,
        }
    }
}

/// The slice of state the [`AuthUser`](crate::auth::AuthUser) extractor needs.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        Self {
            jwt_secret: state.jwt_secret.clone(),
        }
    }
}

impl FromRef<ApiState> for Key {
    fn from_ref(state: &ApiState) -> Self {
        state.cookie_key.clone()
    }
}
