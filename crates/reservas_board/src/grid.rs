// --- File: crates/reservas_board/src/grid.rs ---
//! What the board renders: room cards with their slot grid and the lines of
//! the reservation list.

use chrono::{NaiveDate, NaiveTime};
use reservas_common::availability::{room_day_grid, OverlapPolicy};
use reservas_common::catalog::Catalog;
use reservas_common::filter::RoomFilter;
use reservas_common::models::{hhmm, Reservation, Room};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCell {
    pub time: NaiveTime,
    pub label: String,
    pub available: bool,
    /// Booking that blocks the cell, if any.
    pub reservation_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomCard {
    pub room: Room,
    pub capacity_label: String,
    pub slots: Vec<SlotCell>,
}

impl RoomCard {
    pub fn slot(&self, time: NaiveTime) -> Option<&SlotCell> {
        self.slots.iter().find(|s| s.time == time)
    }

    pub fn free_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.available).count()
    }
}

/// Cards for the rooms that pass `filter`, in catalog order.
pub fn room_cards(
    catalog: &Catalog,
    filter: &RoomFilter,
    reservations: &[Reservation],
    date: NaiveDate,
    duration_hours: u32,
    policy: OverlapPolicy,
) -> Vec<RoomCard> {
    filter
        .apply(catalog.rooms())
        .into_iter()
        .map(|room| RoomCard {
            room: room.clone(),
            capacity_label: format!("{} lugares", room.capacity),
            slots: room_day_grid(
                reservations,
                room,
                date,
                catalog.time_slots(),
                duration_hours,
                policy,
            )
            .into_iter()
            .map(|cell| SlotCell {
                label: cell.time.format(hhmm::FORMAT).to_string(),
                time: cell.time,
                available: cell.available,
                reservation_id: cell.reservation_id,
            })
            .collect(),
        })
        .collect()
}

/// One entry of the reservation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationLine {
    pub id: String,
    pub room_name: String,
    /// `"{time} • {duration}h • {teacher}"`
    pub headline: String,
    /// `"{turma} - {materia}"`
    pub detail: String,
    pub notes: Option<String>,
    /// Created by the current user, so it may be cancelled from the board.
    pub cancellable: bool,
}

impl ReservationLine {
    pub fn new(reservation: &Reservation, current_user: Option<&str>) -> Self {
        Self {
            id: reservation.id.clone(),
            room_name: reservation.room_name.clone(),
            headline: format!(
                "{} • {}h • {}",
                reservation.time.format(hhmm::FORMAT),
                reservation.duration,
                reservation.teacher
            ),
            detail: format!("{} - {}", reservation.turma, reservation.materia),
            notes: reservation.observacoes.clone(),
            cancellable: is_owned_by(reservation, current_user),
        }
    }
}

pub fn is_owned_by(reservation: &Reservation, user: Option<&str>) -> bool {
    match (reservation.owner.as_deref(), user) {
        (Some(owner), Some(user)) => owner.eq_ignore_ascii_case(user),
        _ => false,
    }
}

/// Lines for `date`, earliest first.
pub fn reservation_lines(
    reservations: &[Reservation],
    date: NaiveDate,
    current_user: Option<&str>,
) -> Vec<ReservationLine> {
    let mut of_day: Vec<&Reservation> = reservations.iter().filter(|r| r.date == date).collect();
    of_day.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.room_name.cmp(&b.room_name)));
    of_day
        .into_iter()
        .map(|r| ReservationLine::new(r, current_user))
        .collect()
}
