#[cfg(test)]
mod tests {
    use crate::grid::{reservation_lines, room_cards, ReservationLine};
    use chrono::{NaiveDate, NaiveTime};
    use reservas_common::availability::OverlapPolicy;
    use reservas_common::catalog::Catalog;
    use reservas_common::filter::{CategoryFilter, RoomFilter};
    use reservas_common::models::{Reservation, RoomCategory};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn reservation(id: &str, room_id: u32, hour: u32, min: u32, duration: u32, owner: Option<&str>) -> Reservation {
        Reservation {
            id: id.to_string(),
            room_id: Some(room_id),
            room_name: Catalog::builtin().room_by_id(room_id).unwrap().name.clone(),
            date: day(),
            time: NaiveTime::from_hms_opt(hour, min, 0).unwrap(),
            duration,
            teacher: "Marta".to_string(),
            turma: "3ºC".to_string(),
            materia: "Física".to_string(),
            observacoes: None,
            owner: owner.map(str::to_string),
        }
    }

    #[test]
    fn test_cards_follow_filter() {
        let catalog = Catalog::builtin();

        let all = room_cards(&catalog, &RoomFilter::default(), &[], day(), 1, OverlapPolicy::Interval);
        assert_eq!(all.len(), 8);
        assert!(all.iter().all(|c| c.free_slots() == 12));

        let auditoriums = RoomFilter::new(CategoryFilter::Only(RoomCategory::Auditorium), "");
        let cards = room_cards(&catalog, &auditoriums, &[], day(), 1, OverlapPolicy::Interval);
        let names: Vec<&str> = cards.iter().map(|c| c.room.name.as_str()).collect();
        assert_eq!(names, vec!["Auditório B. Norte", "Auditório Bloco Sul"]);
        assert_eq!(cards[0].capacity_label, "100 lugares");

        let search = RoomFilter::new(CategoryFilter::All, "OFICINA");
        assert_eq!(room_cards(&catalog, &search, &[], day(), 1, OverlapPolicy::Interval).len(), 1);
    }

    #[test]
    fn test_cards_mark_busy_cells() {
        let catalog = Catalog::builtin();
        let booked = vec![reservation("e1", 8, 14, 0, 2, None)];
        let filter = RoomFilter::new(CategoryFilter::All, "Oficina");
        let fifteen = NaiveTime::from_hms_opt(15, 0, 0).unwrap();

        let interval = room_cards(&catalog, &filter, &booked, day(), 1, OverlapPolicy::Interval);
        let cell = interval[0].slot(fifteen).unwrap();
        assert!(!cell.available);
        assert_eq!(cell.reservation_id.as_deref(), Some("e1"));
        assert_eq!(cell.label, "15:00");

        let start_slot = room_cards(&catalog, &filter, &booked, day(), 1, OverlapPolicy::StartSlot);
        assert!(start_slot[0].slot(fifteen).unwrap().available);
        assert_eq!(start_slot[0].free_slots(), 11);
    }

    #[test]
    fn test_reservation_line_format() {
        let mut r = reservation("e2", 1, 7, 30, 3, Some("Marta@Escola.br"));
        r.observacoes = Some("Aula prática".to_string());

        let line = ReservationLine::new(&r, Some("marta@escola.br"));

        assert_eq!(line.headline, "07:30 • 3h • Marta");
        assert_eq!(line.detail, "3ºC - Física");
        assert_eq!(line.notes.as_deref(), Some("Aula prática"));
        assert!(line.cancellable);
        assert!(!ReservationLine::new(&r, Some("outra@escola.br")).cancellable);
        assert!(!ReservationLine::new(&r, None).cancellable);
    }

    #[test]
    fn test_lines_are_sorted_and_limited_to_the_day() {
        let mut other_day = reservation("e0", 2, 7, 30, 1, None);
        other_day.date = day().succ_opt().unwrap();
        let list = vec![
            reservation("late", 3, 16, 45, 1, None),
            other_day,
            reservation("early", 4, 8, 15, 1, None),
        ];

        let ids: Vec<String> = reservation_lines(&list, day(), None)
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
