// --- File: crates/reservas_auth/src/routes.rs ---
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::authenticator::Authenticator;
use crate::handlers::{callback_handler, login_handler, logout_handler, session_handler};

/// Login, callback, logout and session status, mounted under `/api`.
pub fn routes(auth: Arc<Authenticator>) -> Router {
    Router::new()
        .route("/auth", get(login_handler))
        .route("/auth/callback", get(callback_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/session", get(session_handler))
        .with_state(auth)
}
