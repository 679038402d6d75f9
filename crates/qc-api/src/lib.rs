//! HTTP API for QuizCards.
//!
//! Routes are built by [`router::router`] and share an [`ApiState`]. Every route
//! except the health checks requires an [`auth::AuthUser`].

pub mod attempt;
pub mod auth;
pub mod config;
pub mod error;
pub mod flashcard;
pub mod metrics;
pub mod middleware;
pub mod question;
pub mod router;
pub mod state;
pub mod tracing;
pub mod user;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
