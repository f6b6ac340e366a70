// File: crates/reservas_auth/src/doc.rs
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers;
use reservas_common::models::{MessageResponse, SessionStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login_handler,
        handlers::callback_handler,
        handlers::logout_handler,
        handlers::session_handler
    ),
    components(schemas(MessageResponse, SessionStatus)),
    tags(
        (name = "Auth", description = "Google login and session status")
    )
)]
pub struct AuthApiDoc;
