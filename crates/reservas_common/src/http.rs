// --- File: crates/reservas_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{HttpStatusCode, ReservasError};

pub mod client;

/// Extension trait for ReservasError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for ReservasError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("Request failed with {}: {}", status_code, self);
        }

        // Browser clients read the `error` field directly.
        let body = Json(json!({ "error": self.to_string() }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for ReservasError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
