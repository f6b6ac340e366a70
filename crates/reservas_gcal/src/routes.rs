// --- File: crates/reservas_gcal/src/routes.rs ---

use crate::handlers::{
    create_reservation_handler, delete_reservation_handler, list_reservations_handler,
    method_not_allowed_handler, preflight_handler, rooms_overview_handler, GcalState,
};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Reservation gateway routes, mounted under `/api`.
///
/// `/calendar` answers GET, POST, DELETE and OPTIONS; every other method gets
/// the JSON 405 body.
pub fn routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route(
            "/calendar",
            get(list_reservations_handler)
                .post(create_reservation_handler)
                .delete(delete_reservation_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/calendar/rooms",
            get(rooms_overview_handler).fallback(method_not_allowed_handler),
        )
        .with_state(state)
}
