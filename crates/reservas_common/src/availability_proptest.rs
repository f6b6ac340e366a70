#[cfg(test)]
mod tests {
    use crate::availability::{is_slot_available, room_day_grid, OverlapPolicy};
    use crate::catalog::Catalog;
    use crate::models::Reservation;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn booking(catalog: &Catalog, room_idx: usize, slot_idx: usize, duration: u32, day: u32) -> Reservation {
        let room = &catalog.rooms()[room_idx];
        Reservation {
            id: format!("evt-{}-{}-{}", room_idx, slot_idx, day),
            room_id: Some(room.id),
            room_name: room.name.clone(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            time: catalog.time_slots()[slot_idx],
            duration,
            teacher: "Ana".to_string(),
            turma: "9ºA".to_string(),
            materia: "Matemática".to_string(),
            observacoes: None,
            owner: None,
        }
    }

    proptest! {
        // The booked start slot is never offered again, whatever the rule.
        #[test]
        fn test_booked_start_slot_is_unavailable(
            room_idx in 0..8usize,
            slot_idx in 0..12usize,
            duration in 1..=4u32,
            candidate in 1..=4u32,
            day in 1..=28u32,
        ) {
            let catalog = Catalog::builtin();
            let r = booking(&catalog, room_idx, slot_idx, duration, day);
            let room = &catalog.rooms()[room_idx];
            for policy in [OverlapPolicy::StartSlot, OverlapPolicy::Interval] {
                prop_assert!(!is_slot_available(&[r.clone()], room, r.date, r.time, candidate, policy));
            }
        }

        // Start-slot only ever blocks the one slot.
        #[test]
        fn test_start_slot_blocks_exactly_one_cell(
            room_idx in 0..8usize,
            slot_idx in 0..12usize,
            duration in 1..=4u32,
            candidate in 1..=4u32,
        ) {
            let catalog = Catalog::builtin();
            let r = booking(&catalog, room_idx, slot_idx, duration, 1);
            let room = &catalog.rooms()[room_idx];
            let grid = room_day_grid(&[r], room, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                catalog.time_slots(), candidate, OverlapPolicy::StartSlot);
            prop_assert_eq!(grid.iter().filter(|s| !s.available).count(), 1);
            prop_assert!(!grid[slot_idx].available);
        }

        // Interval rule agrees with a direct overlap computation.
        #[test]
        fn test_interval_matches_overlap_definition(
            room_idx in 0..8usize,
            slot_idx in 0..12usize,
            duration in 1..=4u32,
            candidate in 1..=4u32,
        ) {
            let catalog = Catalog::builtin();
            let r = booking(&catalog, room_idx, slot_idx, duration, 1);
            let room = &catalog.rooms()[room_idx];
            let date = r.date;
            let grid = room_day_grid(&[r.clone()], room, date, catalog.time_slots(),
                candidate, OverlapPolicy::Interval);
            for cell in grid {
                let start = date.and_time(cell.time);
                let end = start + Duration::hours(i64::from(candidate));
                let overlaps = start < r.ends_at() && r.starts_at() < end;
                prop_assert_eq!(cell.available, !overlaps);
            }
        }

        // Bookings in other rooms never block.
        #[test]
        fn test_other_room_never_blocks(
            room_idx in 0..8usize,
            other_idx in 0..8usize,
            slot_idx in 0..12usize,
            duration in 1..=4u32,
        ) {
            prop_assume!(room_idx != other_idx);
            let catalog = Catalog::builtin();
            let r = booking(&catalog, other_idx, slot_idx, duration, 1);
            let room = &catalog.rooms()[room_idx];
            for policy in [OverlapPolicy::StartSlot, OverlapPolicy::Interval] {
                prop_assert!(is_slot_available(&[r.clone()], room, r.date, r.time, duration, policy));
            }
        }
    }
}
