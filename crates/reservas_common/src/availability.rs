// --- File: crates/reservas_common/src/availability.rs ---
//! Free/busy computation over the reservations loaded for a day.
//!
//! Two overlap rules exist. [`OverlapPolicy::StartSlot`] only blocks a slot
//! when another reservation of the same room starts at exactly that time, so a
//! two hour booking at 10:00 leaves 11:00 bookable. [`OverlapPolicy::Interval`]
//! compares the half-open intervals `[start, start + duration)` and blocks
//! every slot that would intersect an existing booking.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::error::{validation_error, ReservasError};
use crate::models::{hhmm, Reservation, Room};

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    StartSlot,
    #[default]
    Interval,
}

impl FromStr for OverlapPolicy {
    type Err = ReservasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "start_slot" => Ok(OverlapPolicy::StartSlot),
            "interval" => Ok(OverlapPolicy::Interval),
            other => Err(validation_error(format!("unknown overlap policy '{}'", other))),
        }
    }
}

/// One cell of a room's day grid.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub time: NaiveTime,
    pub available: bool,
    /// Event id of the booking that blocks this slot.
    pub reservation_id: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub room: Room,
    pub slots: Vec<SlotAvailability>,
}

/// Whether a reservation refers to `room`. Uses the stable id when the
/// reservation carries one, the exact display name otherwise.
pub fn occupies_room(reservation: &Reservation, room: &Room) -> bool {
    match reservation.room_id {
        Some(id) => id == room.id,
        None => reservation.room_name == room.name,
    }
}

fn candidate_interval(date: NaiveDate, time: NaiveTime, duration_hours: u32) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(time);
    // A zero-length candidate still occupies its own slot.
    let end = start + Duration::hours(i64::from(duration_hours.max(1)));
    (start, end)
}

/// First reservation that blocks `(room, date, time)` for `duration_hours`.
pub fn find_conflict<'a>(
    reservations: &'a [Reservation],
    room: &Room,
    date: NaiveDate,
    time: NaiveTime,
    duration_hours: u32,
    policy: OverlapPolicy,
) -> Option<&'a Reservation> {
    let (start, end) = candidate_interval(date, time, duration_hours);

    reservations
        .iter()
        .filter(|r| occupies_room(r, room))
        .find(|r| match policy {
            OverlapPolicy::StartSlot => r.date == date && r.time == time,
            OverlapPolicy::Interval => {
                let existing_end = r.starts_at() + Duration::hours(i64::from(r.duration.max(1)));
                r.starts_at() < end && start < existing_end
            }
        })
}

pub fn is_slot_available(
    reservations: &[Reservation],
    room: &Room,
    date: NaiveDate,
    time: NaiveTime,
    duration_hours: u32,
    policy: OverlapPolicy,
) -> bool {
    find_conflict(reservations, room, date, time, duration_hours, policy).is_none()
}

/// Availability of every slot of one room on `date`.
pub fn room_day_grid(
    reservations: &[Reservation],
    room: &Room,
    date: NaiveDate,
    slots: &[NaiveTime],
    duration_hours: u32,
    policy: OverlapPolicy,
) -> Vec<SlotAvailability> {
    slots
        .iter()
        .map(|&time| {
            let conflict = find_conflict(reservations, room, date, time, duration_hours, policy);
            SlotAvailability {
                time,
                available: conflict.is_none(),
                reservation_id: conflict.map(|r| r.id.clone()),
            }
        })
        .collect()
}

/// Day grid for each of `rooms`, using the catalog's slots.
pub fn day_overview<'a, I>(
    catalog: &Catalog,
    rooms: I,
    reservations: &[Reservation],
    date: NaiveDate,
    duration_hours: u32,
    policy: OverlapPolicy,
) -> Vec<RoomAvailability>
where
    I: IntoIterator<Item = &'a Room>,
{
    rooms
        .into_iter()
        .map(|room| RoomAvailability {
            room: room.clone(),
            slots: room_day_grid(
                reservations,
                room,
                date,
                catalog.time_slots(),
                duration_hours,
                policy,
            ),
        })
        .collect()
}
