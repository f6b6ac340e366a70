// File: crates/reservas_gcal/src/handlers.rs
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use reservas_auth::Authenticator;
use reservas_common::catalog::Catalog;
use reservas_common::error::ReservasError;
use reservas_common::models::{MessageResponse, Reservation, ReservationRequest};
use std::sync::Arc;

use crate::logic::{
    create_reservation, delete_reservation, list_reservations, parse_date, rooms_overview,
    BookingLocks, BookingSettings, DeleteQuery, DynCalendarService, ListQuery,
    RoomsOverviewResponse, RoomsQuery,
};

// Shared state for the calendar handlers
pub struct GcalState {
    pub settings: BookingSettings,
    pub catalog: Arc<Catalog>,
    pub auth: Arc<Authenticator>,
    pub calendar: Arc<DynCalendarService>,
    /// Serializes conflict check and insert per room.
    pub booking_locks: BookingLocks,
}

impl GcalState {
    pub fn new(
        settings: BookingSettings,
        catalog: Arc<Catalog>,
        auth: Arc<Authenticator>,
        calendar: Arc<DynCalendarService>,
    ) -> Self {
        Self {
            settings,
            catalog,
            auth,
            calendar,
            booking_locks: BookingLocks::default(),
        }
    }
}

/// Handler to list the reservations of one day.
#[axum::debug_handler]
pub async fn list_reservations_handler(
    State(state): State<Arc<GcalState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Reservation>>, ReservasError> {
    let user = state.auth.resolve(&headers).await?;
    let date = parse_date(query.date.as_deref())?;

    let reservations =
        list_reservations(state.calendar.as_ref(), &state.settings, &user.access_token, date)
            .await?;
    Ok(Json(reservations))
}

/// Handler to book a room slot.
#[axum::debug_handler]
pub async fn create_reservation_handler(
    State(state): State<Arc<GcalState>>,
    headers: HeaderMap,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Reservation>), ReservasError> {
    let user = state.auth.resolve(&headers).await?;
    let Json(request) = payload.map_err(|e| ReservasError::ParseError(e.body_text()))?;

    let reservation = create_reservation(
        state.calendar.as_ref(),
        &state.settings,
        &state.catalog,
        &state.booking_locks,
        &user,
        &request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Handler to cancel a reservation by event id.
#[axum::debug_handler]
pub async fn delete_reservation_handler(
    State(state): State<Arc<GcalState>>,
    headers: HeaderMap,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<MessageResponse>, ReservasError> {
    let user = state.auth.resolve(&headers).await?;
    delete_reservation(
        state.calendar.as_ref(),
        &state.settings,
        &user,
        query.event_id.as_deref(),
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Reserva cancelada".to_string(),
    }))
}

/// Rooms with their slot grid for a date, filtered by category and name.
#[axum::debug_handler]
pub async fn rooms_overview_handler(
    State(state): State<Arc<GcalState>>,
    headers: HeaderMap,
    Query(query): Query<RoomsQuery>,
) -> Result<Json<RoomsOverviewResponse>, ReservasError> {
    let user = state.auth.resolve(&headers).await?;
    let overview = rooms_overview(
        state.calendar.as_ref(),
        &state.settings,
        &state.catalog,
        &user.access_token,
        &query,
    )
    .await?;
    Ok(Json(overview))
}

pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed_handler() -> ReservasError {
    ReservasError::MethodNotAllowed
}
