// --- File: crates/reservas_common/src/routes.rs ---
use axum::{routing::get, Router};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::handlers::{catalog_handler, health_handler};

/// Health check and catalog routes, mounted under `/api`.
pub fn routes(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/catalog", get(catalog_handler))
        .with_state(catalog)
}
