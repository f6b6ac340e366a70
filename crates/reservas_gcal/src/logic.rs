// --- File: crates/reservas_gcal/src/logic.rs ---
use chrono::NaiveDate;
use chrono_tz::Tz;
use reservas_auth::AuthorizedUser;
use reservas_common::availability::{day_overview, find_conflict, OverlapPolicy, RoomAvailability};
use reservas_common::catalog::Catalog;
use reservas_common::codec::{day_window, decode_event, encode_reservation};
use reservas_common::error::ReservasError;
use reservas_common::filter::{CategoryFilter, RoomFilter};
use reservas_common::models::{hhmm, NewReservation, Reservation, ReservationRequest};
use reservas_common::services::CalendarService;
use reservas_config::AppConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::service::GcalServiceError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub type DynCalendarService = dyn CalendarService<Error = GcalServiceError>;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Por favor, preencha turma e matéria";

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum GcalError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Service(#[from] GcalServiceError),
}

impl From<GcalError> for ReservasError {
    fn from(err: GcalError) -> Self {
        match err {
            GcalError::Validation(msg) => ReservasError::ValidationError(msg),
            GcalError::Conflict(msg) => ReservasError::ConflictError(msg),
            GcalError::Config(msg) => ReservasError::ConfigError(msg),
            GcalError::Service(e) => ReservasError::ExternalServiceError {
                service_name: "google-calendar".to_string(),
                message: e.to_string(),
            },
        }
    }
}

/// Calendar and booking rules resolved from configuration.
#[derive(Debug, Clone)]
pub struct BookingSettings {
    pub calendar_id: String,
    pub time_zone: Tz,
    pub color_id: String,
    pub policy: OverlapPolicy,
    pub max_duration_hours: u32,
}

impl BookingSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, GcalError> {
        let time_zone: Tz = config.google.time_zone.parse().map_err(|e| {
            GcalError::Config(format!(
                "invalid time zone '{}': {}",
                config.google.time_zone, e
            ))
        })?;
        let policy: OverlapPolicy = config
            .booking
            .overlap_policy
            .parse()
            .map_err(|e: ReservasError| GcalError::Config(e.to_string()))?;
        if config.booking.max_duration_hours == 0 {
            return Err(GcalError::Config(
                "booking.max_duration_hours must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            calendar_id: config.google.calendar_id.clone(),
            time_zone,
            color_id: config.google.color_id.clone(),
            policy,
            max_duration_hours: config.booking.max_duration_hours,
        })
    }
}

/// One lock per room. The conflict check and the insert for a room run under
/// its lock, so bookings of different rooms never wait on each other.
#[derive(Debug, Default)]
pub struct BookingLocks {
    rooms: std::sync::Mutex<HashMap<u32, Arc<Mutex<()>>>>,
}

impl BookingLocks {
    pub fn for_room(&self, room_id: u32) -> Arc<Mutex<()>> {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        rooms.entry(room_id).or_default().clone()
    }
}

// --- Data Structures ---
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListQuery {
    /// Day to list, YYYY-MM-DD
    #[cfg_attr(feature = "openapi", param(example = "2024-05-01"))]
    pub date: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DeleteQuery {
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct RoomsQuery {
    pub date: Option<String>,
    /// `all`, `laboratory`, `classroom` or `auditorium`
    pub category: Option<String>,
    /// Case-insensitive part of the room name
    pub search: Option<String>,
    /// Hours the caller wants to book; defaults to 1
    pub duration: Option<u32>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RoomsOverviewResponse {
    #[cfg_attr(feature = "openapi", schema(example = "2024-05-01"))]
    pub date: String,
    pub duration: u32,
    pub policy: OverlapPolicy,
    pub rooms: Vec<RoomAvailability>,
}

pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, GcalError> {
    let raw = raw
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| GcalError::Validation("Parâmetro date é obrigatório".to_string()))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| GcalError::Validation(format!("Data inválida: {} (use AAAA-MM-DD)", raw)))
}

fn check_duration(duration: i64, settings: &BookingSettings) -> Result<u32, GcalError> {
    u32::try_from(duration)
        .ok()
        .filter(|d| (1..=settings.max_duration_hours).contains(d))
        .ok_or_else(|| {
            GcalError::Validation(format!(
                "Duração deve ser entre 1 e {} horas",
                settings.max_duration_hours
            ))
        })
}

// Blank means whitespace only; anything else is kept exactly as submitted.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Checks a booking request against the catalog and booking rules.
///
/// An empty teacher name falls back to the logged-in user's name; the owner
/// is always the user's email.
pub fn validate_request(
    catalog: &Catalog,
    settings: &BookingSettings,
    request: &ReservationRequest,
    user: &AuthorizedUser,
) -> Result<NewReservation, GcalError> {
    let room = catalog
        .resolve(request.space_id, &request.space)
        .ok_or_else(|| GcalError::Validation(format!("Sala desconhecida: {}", request.space)))?;

    let date = parse_date(Some(&request.date))?;
    let time = hhmm::parse(&request.time)
        .map_err(|_| GcalError::Validation(format!("Horário inválido: {}", request.time)))?;
    if !catalog.is_slot(time) {
        return Err(GcalError::Validation(format!(
            "Horário fora da grade: {}",
            request.time
        )));
    }
    let duration = check_duration(request.duration, settings)?;

    let (Some(turma), Some(materia)) = (
        non_blank(Some(&request.turma)),
        non_blank(Some(&request.materia)),
    ) else {
        return Err(GcalError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    Ok(NewReservation {
        room: room.clone(),
        date,
        time,
        duration,
        teacher: non_blank(request.teacher.as_deref())
            .unwrap_or_else(|| user.user.display_name().to_string()),
        turma,
        materia,
        observacoes: non_blank(request.observacoes.as_deref()),
        owner: Some(user.user.email.clone()),
    })
}

/// Reservations on `date` (local day in the configured zone).
pub async fn list_reservations(
    calendar: &DynCalendarService,
    settings: &BookingSettings,
    access_token: &str,
    date: NaiveDate,
) -> Result<Vec<Reservation>, GcalError> {
    list_days(calendar, settings, access_token, date, date).await
}

/// Reservations overlapping the local days `first..=last`.
async fn list_days(
    calendar: &DynCalendarService,
    settings: &BookingSettings,
    access_token: &str,
    first: NaiveDate,
    last: NaiveDate,
) -> Result<Vec<Reservation>, GcalError> {
    let window = |date: NaiveDate| {
        day_window(date, settings.time_zone).map_err(|e| GcalError::Validation(e.to_string()))
    };
    let (start, _) = window(first)?;
    let (_, end) = window(last)?;

    let events = calendar
        .list_events(access_token, &settings.calendar_id, start, end)
        .await?;
    let total = events.len();

    let reservations: Vec<Reservation> = events
        .iter()
        .filter_map(|e| decode_event(e, settings.time_zone))
        .collect();
    debug!(
        "Listed {} reservations for {}..={} ({} events)",
        reservations.len(),
        first,
        last,
        total
    );
    Ok(reservations)
}

/// Validates, checks for a clash and inserts the event.
///
/// The check and the insert run under the room's lock, so two requests served
/// by this process cannot both take the same slot. Existing bookings are read
/// through the day the candidate ends on.
pub async fn create_reservation(
    calendar: &DynCalendarService,
    settings: &BookingSettings,
    catalog: &Catalog,
    locks: &BookingLocks,
    user: &AuthorizedUser,
    request: &ReservationRequest,
) -> Result<Reservation, GcalError> {
    let reservation = validate_request(catalog, settings, request, user)?;

    let room_lock = locks.for_room(reservation.room.id);
    let _guard = room_lock.lock().await;

    let existing = list_days(
        calendar,
        settings,
        &user.access_token,
        reservation.date,
        reservation.ends_at().date(),
    )
    .await?;
    if let Some(clash) = find_conflict(
        &existing,
        &reservation.room,
        reservation.date,
        reservation.time,
        reservation.duration,
        settings.policy,
    ) {
        return Err(GcalError::Conflict(format!(
            "{} já está reservada às {} ({} - {})",
            reservation.room.name,
            clash.time.format(hhmm::FORMAT),
            clash.turma,
            clash.materia
        )));
    }

    let event = encode_reservation(&reservation, settings.time_zone, &settings.color_id)
        .map_err(|e| GcalError::Validation(e.to_string()))?;
    let created = calendar
        .create_event(&user.access_token, &settings.calendar_id, event)
        .await?;

    let stored = decode_event(&created, settings.time_zone).ok_or_else(|| {
        GcalError::Service(GcalServiceError::Conversion(
            "created event has no id".to_string(),
        ))
    })?;
    info!(
        user = %user.user.email,
        room = %stored.room_name,
        "Reserved {} {} for {}h",
        stored.date,
        stored.time.format(hhmm::FORMAT),
        stored.duration
    );
    Ok(stored)
}

pub async fn delete_reservation(
    calendar: &DynCalendarService,
    settings: &BookingSettings,
    user: &AuthorizedUser,
    event_id: Option<&str>,
) -> Result<(), GcalError> {
    let event_id = non_blank(event_id.map(str::trim))
        .ok_or_else(|| GcalError::Validation("Parâmetro eventId é obrigatório".to_string()))?;

    calendar
        .delete_event(&user.access_token, &settings.calendar_id, &event_id)
        .await?;
    info!(user = %user.user.email, "Cancelled reservation {}", event_id);
    Ok(())
}

/// Filtered rooms with their slot grid for one day.
pub async fn rooms_overview(
    calendar: &DynCalendarService,
    settings: &BookingSettings,
    catalog: &Catalog,
    access_token: &str,
    query: &RoomsQuery,
) -> Result<RoomsOverviewResponse, GcalError> {
    let date = parse_date(query.date.as_deref())?;
    let category: CategoryFilter = query
        .category
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e: ReservasError| GcalError::Validation(e.to_string()))?;
    let duration = check_duration(i64::from(query.duration.unwrap_or(1)), settings)?;
    let filter = RoomFilter::new(category, query.search.clone().unwrap_or_default());

    let reservations = list_reservations(calendar, settings, access_token, date).await?;
    let rooms = day_overview(
        catalog,
        filter.apply(catalog.rooms()),
        &reservations,
        date,
        duration,
        settings.policy,
    );

    Ok(RoomsOverviewResponse {
        date: date.format("%Y-%m-%d").to_string(),
        duration,
        policy: settings.policy,
        rooms,
    })
}
