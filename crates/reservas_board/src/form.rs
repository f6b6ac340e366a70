// --- File: crates/reservas_board/src/form.rs ---
use chrono::{NaiveDate, NaiveTime};
use reservas_common::models::{hhmm, ReservationRequest, Room};

use crate::error::BoardError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Por favor, preencha turma e matéria";
pub const MAX_DURATION_HOURS: u32 = 4;

/// The booking dialog opened from a free slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub room: Room,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: u32,
    pub turma: String,
    pub materia: String,
    pub observacoes: String,
}

impl BookingForm {
    pub fn new(room: Room, date: NaiveDate, time: NaiveTime, duration: u32) -> Self {
        Self {
            room,
            date,
            time,
            duration,
            turma: String::new(),
            materia: String::new(),
            observacoes: String::new(),
        }
    }

    /// Checks the fields and builds the gateway request. Nothing is sent
    /// when this fails.
    pub fn validate(&self, teacher: Option<&str>) -> Result<ReservationRequest, BoardError> {
        let turma = self.turma.trim();
        let materia = self.materia.trim();
        if turma.is_empty() || materia.is_empty() {
            return Err(BoardError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        if !(1..=MAX_DURATION_HOURS).contains(&self.duration) {
            return Err(BoardError::Validation(format!(
                "Duração deve ser entre 1 e {} horas",
                MAX_DURATION_HOURS
            )));
        }

        let observacoes = self.observacoes.trim();
        Ok(ReservationRequest {
            space: self.room.name.clone(),
            space_id: Some(self.room.id),
            date: self.date.format("%Y-%m-%d").to_string(),
            time: self.time.format(hhmm::FORMAT).to_string(),
            duration: i64::from(self.duration),
            turma: turma.to_string(),
            materia: materia.to_string(),
            observacoes: (!observacoes.is_empty()).then(|| observacoes.to_string()),
            teacher: teacher.map(str::to_string),
        })
    }
}
