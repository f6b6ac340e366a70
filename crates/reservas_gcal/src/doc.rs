// File: crates/reservas_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::RoomsOverviewResponse;
use reservas_common::availability::{OverlapPolicy, RoomAvailability, SlotAvailability};
use reservas_common::models::{MessageResponse, Reservation, ReservationRequest, Room, RoomCategory};

#[utoipa::path(
    get,
    path = "/calendar",
    params(
        ("date" = String, Query, description = "Day in YYYY-MM-DD format", example = "2024-05-01", format = "date")
    ),
    responses(
        (status = 200, description = "Reservations of the day", body = [Reservation]),
        (status = 400, description = "Missing or malformed date", example = json!({ "error": "Data inválida: 01/05/2024 (use AAAA-MM-DD)" })),
        (status = 401, description = "No valid session", example = json!({ "error": "Não autenticado" })),
        (status = 500, description = "Calendar error")
    ),
    tag = "Reservas"
)]
fn doc_list_reservations_handler() {}

#[utoipa::path(
    post,
    path = "/calendar",
    request_body(content = ReservationRequest, example = json!({
        "space": "Auditório B. Norte",
        "date": "2024-05-01",
        "time": "10:00",
        "duration": 2,
        "turma": "9ºA",
        "materia": "Matemática",
        "observacoes": "Trazer extensão",
        "teacher": "Ana"
    })),
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid request", example = json!({ "error": "Por favor, preencha turma e matéria" })),
        (status = 401, description = "No valid session"),
        (status = 409, description = "Slot already taken", example = json!({ "error": "Auditório B. Norte já está reservada às 10:00 (8ºB - História)" })),
        (status = 500, description = "Calendar error")
    ),
    tag = "Reservas"
)]
fn doc_create_reservation_handler() {}

#[utoipa::path(
    delete,
    path = "/calendar",
    params(
        ("eventId" = String, Query, description = "Calendar event id of the reservation")
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = MessageResponse,
         example = json!({ "message": "Reserva cancelada" })),
        (status = 400, description = "Missing eventId"),
        (status = 401, description = "No valid session"),
        (status = 500, description = "Calendar error")
    ),
    tag = "Reservas"
)]
fn doc_delete_reservation_handler() {}

#[utoipa::path(
    get,
    path = "/calendar/rooms",
    params(
        ("date" = String, Query, description = "Day in YYYY-MM-DD format", example = "2024-05-01"),
        ("category" = Option<String>, Query, description = "all, laboratory, classroom or auditorium"),
        ("search" = Option<String>, Query, description = "Part of the room name, case-insensitive"),
        ("duration" = Option<u32>, Query, description = "Hours to book, 1 by default")
    ),
    responses(
        (status = 200, description = "Rooms with their slot grid", body = RoomsOverviewResponse),
        (status = 400, description = "Invalid filter or date"),
        (status = 401, description = "No valid session")
    ),
    tag = "Reservas"
)]
fn doc_rooms_overview_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_reservations_handler,
        doc_create_reservation_handler,
        doc_delete_reservation_handler,
        doc_rooms_overview_handler
    ),
    components(
        schemas(
            Reservation,
            ReservationRequest,
            MessageResponse,
            Room,
            RoomCategory,
            OverlapPolicy,
            SlotAvailability,
            RoomAvailability,
            RoomsOverviewResponse
        )
    ),
    tags(
        (name = "Reservas", description = "Room reservations on Google Calendar")
    ),
    servers(
        (url = "/api", description = "Reservas API server")
    )
)]
pub struct GcalApiDoc;
