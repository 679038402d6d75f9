//! Cookie-based authentication.
//!
//! Sign-in happens elsewhere; this service only verifies the JWT carried in the
//! encrypted `auth_token` cookie and resolves it to a user id.

pub mod jwt;
pub mod middleware;

pub use middleware::{AUTH_COOKIE, AuthUser};
