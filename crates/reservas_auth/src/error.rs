// --- File: crates/reservas_auth/src/error.rs ---
use reservas_common::error::ReservasError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("OAuth configuration error: {0}")]
    Config(String),
    #[error("Unknown or expired login state")]
    InvalidState,
    #[error("Não autenticado")]
    MissingSession,
    #[error("Sessão expirada, faça login novamente")]
    SessionExpired,
    #[error("Token exchange failed: {0}")]
    Exchange(String),
    #[error("Identity provider error: {0}")]
    Provider(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<AuthError> for ReservasError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Config(msg) => ReservasError::ConfigError(msg),
            AuthError::InvalidState
            | AuthError::MissingSession
            | AuthError::SessionExpired
            | AuthError::Exchange(_) => ReservasError::AuthError(err.to_string()),
            AuthError::Provider(msg) => ReservasError::ExternalServiceError {
                service_name: "google-oauth".to_string(),
                message: msg,
            },
            AuthError::Http(e) => ReservasError::HttpError(e.to_string()),
        }
    }
}
