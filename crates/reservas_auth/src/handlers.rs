// --- File: crates/reservas_auth/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use reservas_common::models::{MessageResponse, SessionStatus};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

use crate::authenticator::Authenticator;

pub const LOGIN_SUCCESS_REDIRECT: &str = "/?authenticated=true";
pub const LOGIN_FAILURE_REDIRECT: &str = "/?error=authentication_failed";

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user declined consent.
    pub error: Option<String>,
}

/// Redirects the browser to the Google consent screen.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/auth",
    responses(
        (status = 303, description = "Redirect to the Google consent screen"),
        (status = 500, description = "OAuth client misconfigured")
    ),
    tag = "Auth"
))]
pub async fn login_handler(State(auth): State<Arc<Authenticator>>) -> Response {
    match auth.begin_login().await {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            error!("Could not start login: {}", e);
            Redirect::to(LOGIN_FAILURE_REDIRECT).into_response()
        }
    }
}

/// Receives the provider's redirect, opens a session and sends the browser home.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackQuery),
    responses(
        (status = 303, description = "Redirect to /?authenticated=true or /?error=authentication_failed")
    ),
    tag = "Auth"
))]
pub async fn callback_handler(
    State(auth): State<Arc<Authenticator>>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if let Some(reason) = query.error {
        warn!("Provider refused authorization: {}", reason);
        return Redirect::to(LOGIN_FAILURE_REDIRECT).into_response();
    }
    let (Some(code), Some(state)) = (query.code, query.state) else {
        warn!("Callback without code or state");
        return Redirect::to(LOGIN_FAILURE_REDIRECT).into_response();
    };

    match auth.complete_login(&code, &state).await {
        Ok(session) => (
            [(header::SET_COOKIE, auth.session_cookie(&session.id).to_string())],
            Redirect::to(LOGIN_SUCCESS_REDIRECT),
        )
            .into_response(),
        Err(e) => {
            error!("Login failed: {}", e);
            Redirect::to(LOGIN_FAILURE_REDIRECT).into_response()
        }
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Session closed", body = MessageResponse)),
    tag = "Auth"
))]
pub async fn logout_handler(
    State(auth): State<Arc<Authenticator>>,
    headers: HeaderMap,
) -> Response {
    auth.logout(&headers).await;
    (
        [(header::SET_COOKIE, auth.removal_cookie().to_string())],
        Json(MessageResponse {
            message: "Sessão encerrada".to_string(),
        }),
    )
        .into_response()
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/auth/session",
    responses((status = 200, description = "Whether the caller is logged in", body = SessionStatus)),
    tag = "Auth"
))]
pub async fn session_handler(
    State(auth): State<Arc<Authenticator>>,
    headers: HeaderMap,
) -> Json<SessionStatus> {
    let user = auth.current_user(&headers).await;
    Json(SessionStatus {
        authenticated: user.is_some(),
        user: user.map(|u| u.email),
    })
}
