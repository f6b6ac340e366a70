// --- File: crates/reservas_common/src/catalog.rs ---
//! The fixed set of bookable rooms and daily start times.

use chrono::NaiveTime;
use reservas_config::CatalogConfig;
use std::collections::HashSet;

use crate::error::{config_error, ReservasError};
use crate::models::{hhmm, Room, RoomCategory};

const BUILTIN_SLOTS: [(u32, u32); 12] = [
    (7, 30),
    (8, 15),
    (9, 15),
    (10, 0),
    (11, 0),
    (11, 45),
    (13, 15),
    (14, 0),
    (15, 0),
    (15, 45),
    (16, 45),
    (17, 30),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    rooms: Vec<Room>,
    time_slots: Vec<NaiveTime>,
}

impl Catalog {
    /// The school's own rooms and bell schedule.
    pub fn builtin() -> Self {
        let room = |id, name: &str, category, capacity, resources: &[&str]| Room {
            id,
            name: name.to_string(),
            category,
            capacity,
            resources: resources.iter().map(|r| r.to_string()).collect(),
        };
        let chromebook_lab = ["34 Chromebooks", "Projetor", "Rede Wi-Fi"];
        let stage = ["Projetor", "Sistema de som", "Palco"];

        let rooms = vec![
            room(1, "Atelier de Artes", RoomCategory::Classroom, 30,
                &["Mesas de trabalho", "Materiais artísticos", "Pia"]),
            room(2, "Auditório B. Norte", RoomCategory::Auditorium, 100, &stage),
            room(3, "Auditório Bloco Sul", RoomCategory::Auditorium, 120, &stage),
            room(4, "BS - Chrome A (34un)", RoomCategory::Laboratory, 34, &chromebook_lab),
            room(5, "BS - Chrome B (34un)", RoomCategory::Laboratory, 34, &chromebook_lab),
            room(6, "BS - Chrome C (34un)", RoomCategory::Laboratory, 34, &chromebook_lab),
            room(7, "Conj. Chrome E (8un)", RoomCategory::Laboratory, 8,
                &["8 Chromebooks", "Mesa compartilhada"]),
            room(8, "Oficina de Invenções", RoomCategory::Classroom, 25,
                &["Ferramentas", "Bancadas", "Materiais maker"]),
        ];

        let time_slots = BUILTIN_SLOTS
            .iter()
            .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .collect();

        Self { rooms, time_slots }
    }

    /// Builds the catalog, replacing rooms and/or slots from configuration.
    pub fn from_config(config: Option<&CatalogConfig>) -> Result<Self, ReservasError> {
        let mut catalog = Self::builtin();
        let Some(config) = config else {
            return Ok(catalog);
        };

        if let Some(rooms) = &config.rooms {
            if rooms.is_empty() {
                return Err(config_error("catalog.rooms must not be empty"));
            }
            let mut seen = HashSet::new();
            catalog.rooms = rooms
                .iter()
                .map(|r| {
                    if !seen.insert(r.id) {
                        return Err(config_error(format!("duplicate room id {}", r.id)));
                    }
                    Ok(Room {
                        id: r.id,
                        name: r.name.clone(),
                        category: r.category.parse()?,
                        capacity: r.capacity,
                        resources: r.resources.clone(),
                    })
                })
                .collect::<Result<_, ReservasError>>()?;
        }

        if let Some(slots) = &config.time_slots {
            let mut parsed = slots
                .iter()
                .map(|s| {
                    hhmm::parse(s).map_err(|_| config_error(format!("invalid time slot '{}'", s)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.sort();
            parsed.dedup();
            if parsed.is_empty() {
                return Err(config_error("catalog.time_slots must not be empty"));
            }
            catalog.time_slots = parsed;
        }

        Ok(catalog)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn time_slots(&self) -> &[NaiveTime] {
        &self.time_slots
    }

    pub fn room_by_id(&self, id: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        let name = name.trim();
        self.rooms.iter().find(|r| r.name == name)
    }

    /// Id first, then display name.
    pub fn resolve(&self, space_id: Option<u32>, space: &str) -> Option<&Room> {
        match space_id {
            Some(id) => self.room_by_id(id),
            None => self.room_by_name(space),
        }
    }

    pub fn is_slot(&self, time: NaiveTime) -> bool {
        self.time_slots.contains(&time)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
