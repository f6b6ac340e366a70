// --- File: crates/reservas_common/src/codec.rs ---
//! Mapping between reservations and calendar events.
//!
//! Events written by this application carry the structured fields as private
//! properties. Events created by hand in the calendar only have the title
//! `"{room} - {turma} - {materia}"`, the location and the labeled description
//! lines, so decoding falls back to those.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;

use crate::error::{validation_error, ReservasError};
use crate::models::{NewReservation, Reservation};
use crate::services::CalendarEvent;

pub const PROP_ROOM_ID: &str = "roomId";
pub const PROP_TEACHER: &str = "teacher";
pub const PROP_TURMA: &str = "turma";
pub const PROP_MATERIA: &str = "materia";
pub const PROP_OBSERVACOES: &str = "observacoes";
pub const PROP_DURATION: &str = "durationHours";
pub const PROP_OWNER: &str = "owner";

const LABEL_TEACHER: &str = "Professor: ";
const LABEL_TURMA: &str = "Turma: ";
const LABEL_MATERIA: &str = "Matéria: ";
const LABEL_OBSERVACOES: &str = "Observações: ";
const TITLE_SEPARATOR: &str = " - ";

pub const UNKNOWN_TEACHER: &str = "Desconhecido";

/// Google rejects private property values longer than this many bytes.
pub const MAX_PROPERTY_VALUE_LEN: usize = 1024;

pub fn summary_for(room_name: &str, turma: &str, materia: &str) -> String {
    format!("{room_name}{TITLE_SEPARATOR}{turma}{TITLE_SEPARATOR}{materia}")
}

pub fn description_for(teacher: &str, turma: &str, materia: &str, observacoes: Option<&str>) -> String {
    let mut description = format!(
        "{LABEL_TEACHER}{teacher}\n{LABEL_TURMA}{turma}\n{LABEL_MATERIA}{materia}\n"
    );
    if let Some(notes) = observacoes.filter(|n| !n.trim().is_empty()) {
        description.push_str(LABEL_OBSERVACOES);
        description.push_str(notes);
    }
    description
}

/// Local wall-clock time to an instant. Times inside a DST gap move forward
/// to the first valid instant; ambiguous times take the earlier one.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz.from_local_datetime(&(naive + Duration::hours(1))).earliest(),
    }
}

/// Start (00:00:00.000) and end (23:59:59.999) of `date` in `tz`, as UTC.
pub fn day_window(date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>), ReservasError> {
    let invalid = || validation_error(format!("Data inválida: {}", date));
    let start_naive = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
    let end_naive = date.and_hms_milli_opt(23, 59, 59, 999).ok_or_else(invalid)?;

    let start = resolve_local(tz, start_naive).ok_or_else(invalid)?;
    let end = resolve_local(tz, end_naive).ok_or_else(invalid)?;
    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Builds the calendar event for a validated reservation.
pub fn encode_reservation(
    reservation: &NewReservation,
    tz: Tz,
    color_id: &str,
) -> Result<CalendarEvent, ReservasError> {
    let start = resolve_local(tz, reservation.starts_at()).ok_or_else(|| {
        validation_error(format!(
            "Horário inexistente em {}: {}",
            tz.name(),
            reservation.starts_at()
        ))
    })?;
    let end = start + Duration::hours(i64::from(reservation.duration));

    let mut props: BTreeMap<String, String> = BTreeMap::new();
    props.insert(PROP_ROOM_ID.to_string(), reservation.room.id.to_string());
    props.insert(PROP_TEACHER.to_string(), reservation.teacher.clone());
    props.insert(PROP_TURMA.to_string(), reservation.turma.clone());
    props.insert(PROP_MATERIA.to_string(), reservation.materia.clone());
    props.insert(PROP_DURATION.to_string(), reservation.duration.to_string());
    if let Some(notes) = reservation.observacoes.as_ref().filter(|n| !n.trim().is_empty()) {
        props.insert(PROP_OBSERVACOES.to_string(), notes.clone());
    }
    if let Some(owner) = &reservation.owner {
        props.insert(PROP_OWNER.to_string(), owner.clone());
    }
    // Oversized values live only in the description, which decoding falls back to.
    props.retain(|_, value| value.len() <= MAX_PROPERTY_VALUE_LEN);

    Ok(CalendarEvent {
        id: None,
        summary: summary_for(&reservation.room.name, &reservation.turma, &reservation.materia),
        description: Some(description_for(
            &reservation.teacher,
            &reservation.turma,
            &reservation.materia,
            reservation.observacoes.as_deref(),
        )),
        location: Some(reservation.room.name.clone()),
        start: start.with_timezone(&Utc),
        end: end.with_timezone(&Utc),
        time_zone: Some(tz.name().to_string()),
        color_id: Some(color_id.to_string()),
        private_properties: props,
        status: None,
    })
}

fn description_line<'a>(description: Option<&'a str>, label: &str) -> Option<&'a str> {
    description?
        .lines()
        .find_map(|line| line.trim_start().strip_prefix(label))
        .map(str::trim)
}

fn property<'a>(event: &'a CalendarEvent, key: &str) -> Option<&'a str> {
    event
        .private_properties
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

/// Decodes an event into a reservation. Events without an id are skipped.
pub fn decode_event(event: &CalendarEvent, tz: Tz) -> Option<Reservation> {
    let id = event.id.clone()?;
    let description = event.description.as_deref();
    let mut title_parts = event.summary.splitn(3, TITLE_SEPARATOR);
    let title_room = title_parts.next().map(str::trim).unwrap_or_default();
    let title_turma = title_parts.next().map(str::trim);
    let title_materia = title_parts.next().map(str::trim);

    let room_name = event
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(title_room)
        .to_string();

    let field = |key: &str, label: &str, title: Option<&str>| -> String {
        property(event, key)
            .or_else(|| description_line(description, label))
            .or(title)
            .unwrap_or_default()
            .to_string()
    };

    let local_start = event.start.with_timezone(&tz);
    let measured_hours = (event.end - event.start).num_minutes() as f64 / 60.0;
    let duration = property(event, PROP_DURATION)
        .and_then(|d| d.parse::<u32>().ok())
        .unwrap_or_else(|| measured_hours.round().max(1.0) as u32);

    Some(Reservation {
        id,
        room_id: property(event, PROP_ROOM_ID).and_then(|v| v.parse().ok()),
        room_name,
        date: local_start.date_naive(),
        time: local_start.time(),
        duration,
        teacher: property(event, PROP_TEACHER)
            .or_else(|| description_line(description, LABEL_TEACHER))
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TEACHER)
            .to_string(),
        turma: field(PROP_TURMA, LABEL_TURMA, title_turma),
        materia: field(PROP_MATERIA, LABEL_MATERIA, title_materia),
        observacoes: property(event, PROP_OBSERVACOES)
            .or_else(|| description_line(description, LABEL_OBSERVACOES))
            .filter(|o| !o.is_empty())
            .map(str::to_string),
        owner: property(event, PROP_OWNER).map(str::to_string),
    })
}
