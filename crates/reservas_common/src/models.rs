// --- File: crates/reservas_common/src/models.rs ---

// Rooms, reservations and the request/response bodies shared by the gateway,
// the auth endpoints and the board client.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{validation_error, ReservasError};

/// Kind of room; drives the category filter.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Laboratory,
    Classroom,
    Auditorium,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 3] = [
        RoomCategory::Laboratory,
        RoomCategory::Classroom,
        RoomCategory::Auditorium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Laboratory => "laboratory",
            RoomCategory::Classroom => "classroom",
            RoomCategory::Auditorium => "auditorium",
        }
    }

    /// Label shown on the category tabs.
    pub fn label(&self) -> &'static str {
        match self {
            RoomCategory::Laboratory => "Labs Chromebook",
            RoomCategory::Classroom => "Ateliers/Oficinas",
            RoomCategory::Auditorium => "Auditórios",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomCategory {
    type Err = ReservasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "laboratory" => Ok(RoomCategory::Laboratory),
            "classroom" => Ok(RoomCategory::Classroom),
            "auditorium" => Ok(RoomCategory::Auditorium),
            other => Err(validation_error(format!("Categoria desconhecida: {}", other))),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier, stored with every reservation.
    pub id: u32,
    pub name: String,
    pub category: RoomCategory,
    pub capacity: u32,
    pub resources: Vec<String>,
}

/// A booking decoded from a calendar event.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Calendar event id.
    pub id: String,
    /// Present for events created by this application.
    pub room_id: Option<u32>,
    pub room_name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-05-01"))]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub time: NaiveTime,
    /// Whole hours.
    pub duration: u32,
    pub teacher: String,
    pub turma: String,
    pub materia: String,
    pub observacoes: Option<String>,
    /// Email of the session that created the booking, when known.
    pub owner: Option<String>,
}

impl Reservation {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at() + Duration::hours(i64::from(self.duration))
    }
}

/// Body of `POST /api/calendar`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Room display name.
    pub space: String,
    /// Stable room id; wins over `space` when both are sent.
    #[serde(default)]
    pub space_id: Option<u32>,
    #[cfg_attr(feature = "openapi", schema(example = "2024-05-01"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    pub time: String,
    /// Hours.
    pub duration: i64,
    pub turma: String,
    pub materia: String,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
}

/// A validated reservation ready to be encoded as an event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub room: Room,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: u32,
    pub teacher: String,
    pub turma: String,
    pub materia: String,
    pub observacoes: Option<String>,
    pub owner: Option<String>,
}

impl NewReservation {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at() + Duration::hours(i64::from(self.duration))
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /api/auth/session`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<String>,
}

/// `HH:MM` (de)serialization for slot times; also accepts `HH:MM:SS`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"))
    }
}
