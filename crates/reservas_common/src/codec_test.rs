#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::codec::{
        day_window, decode_event, description_for, encode_reservation, MAX_PROPERTY_VALUE_LEN,
        PROP_OBSERVACOES, PROP_OWNER, PROP_ROOM_ID, UNKNOWN_TEACHER,
    };
    use crate::models::NewReservation;
    use crate::services::CalendarEvent;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use chrono_tz::America::Sao_Paulo;
    use std::collections::BTreeMap;

    fn new_reservation(room_id: u32, observacoes: Option<&str>) -> NewReservation {
        NewReservation {
            room: Catalog::builtin().room_by_id(room_id).unwrap().clone(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration: 2,
            teacher: "Ana".to_string(),
            turma: "9ºA".to_string(),
            materia: "Matemática".to_string(),
            observacoes: observacoes.map(str::to_string),
            owner: Some("ana@escola.br".to_string()),
        }
    }

    fn hand_made_event(summary: &str, location: Option<&str>, description: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            id: Some("manual-1".to_string()),
            summary: summary.to_string(),
            description: description.map(str::to_string),
            location: location.map(str::to_string),
            // 09:15-10:15 in São Paulo (UTC-3)
            start: Utc.with_ymd_and_hms(2024, 5, 1, 12, 15, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 5, 1, 13, 15, 0).unwrap(),
            time_zone: None,
            color_id: None,
            private_properties: BTreeMap::new(),
            status: Some("confirmed".to_string()),
        }
    }

    #[test]
    fn test_encode_builds_title_description_and_times() {
        let event = encode_reservation(&new_reservation(2, Some("Trazer extensão")), Sao_Paulo, "9").unwrap();

        assert_eq!(event.summary, "Auditório B. Norte - 9ºA - Matemática");
        assert_eq!(
            event.description.as_deref(),
            Some("Professor: Ana\nTurma: 9ºA\nMatéria: Matemática\nObservações: Trazer extensão")
        );
        assert_eq!(event.location.as_deref(), Some("Auditório B. Norte"));
        assert_eq!(event.color_id.as_deref(), Some("9"));
        assert_eq!(event.time_zone.as_deref(), Some("America/Sao_Paulo"));
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap());
        assert_eq!(event.private_properties.get(PROP_ROOM_ID).map(String::as_str), Some("2"));
        assert_eq!(event.private_properties.get(PROP_OWNER).map(String::as_str), Some("ana@escola.br"));
    }

    #[test]
    fn test_description_without_notes() {
        assert_eq!(
            description_for("Ana", "9ºA", "Matemática", None),
            "Professor: Ana\nTurma: 9ºA\nMatéria: Matemática\n"
        );
        assert_eq!(
            description_for("Ana", "9ºA", "Matemática", Some("  ")),
            "Professor: Ana\nTurma: 9ºA\nMatéria: Matemática\n"
        );
    }

    #[test]
    fn test_created_event_decodes_to_submitted_fields() {
        let submitted = new_reservation(4, Some("Levar fones"));
        let mut event = encode_reservation(&submitted, Sao_Paulo, "9").unwrap();
        event.id = Some("evt-42".to_string());

        let decoded = decode_event(&event, Sao_Paulo).unwrap();

        assert_eq!(decoded.id, "evt-42");
        assert_eq!(decoded.room_id, Some(4));
        // The room name contains the title separator; location keeps it intact.
        assert_eq!(decoded.room_name, "BS - Chrome A (34un)");
        assert_eq!(decoded.date, submitted.date);
        assert_eq!(decoded.time, submitted.time);
        assert_eq!(decoded.duration, 2);
        assert_eq!(decoded.teacher, "Ana");
        assert_eq!(decoded.turma, "9ºA");
        assert_eq!(decoded.materia, "Matemática");
        assert_eq!(decoded.observacoes.as_deref(), Some("Levar fones"));
        assert_eq!(decoded.owner.as_deref(), Some("ana@escola.br"));
    }

    #[test]
    fn test_long_notes_stay_out_of_private_properties() {
        let notes = "Levar mapas e atlas. ".repeat(100);
        assert!(notes.len() > MAX_PROPERTY_VALUE_LEN);
        let mut event = encode_reservation(&new_reservation(3, Some(&notes)), Sao_Paulo, "9").unwrap();
        event.id = Some("evt-long".to_string());

        assert!(!event.private_properties.contains_key(PROP_OBSERVACOES));
        assert!(event.private_properties.values().all(|v| v.len() <= MAX_PROPERTY_VALUE_LEN));
        assert_eq!(event.private_properties.get(PROP_OWNER).map(String::as_str), Some("ana@escola.br"));

        let decoded = decode_event(&event, Sao_Paulo).unwrap();
        assert_eq!(decoded.observacoes.as_deref(), Some(notes.trim()));
        assert_eq!(decoded.turma, "9ºA");
    }

    #[test]
    fn test_hand_made_event_falls_back_to_text() {
        let event = hand_made_event(
            "Oficina de Invenções - 7ºB - Ciências",
            None,
            Some("Professor: Bruno\nTurma: 7ºB\nMatéria: Ciências\nObservações: Robótica"),
        );

        let decoded = decode_event(&event, Sao_Paulo).unwrap();

        assert_eq!(decoded.room_id, None);
        assert_eq!(decoded.room_name, "Oficina de Invenções");
        assert_eq!(decoded.time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(decoded.duration, 1);
        assert_eq!(decoded.teacher, "Bruno");
        assert_eq!(decoded.observacoes.as_deref(), Some("Robótica"));
    }

    #[test]
    fn test_missing_teacher_decodes_as_unknown() {
        let event = hand_made_event("Reunião pedagógica", Some("Auditório Bloco Sul"), None);

        let decoded = decode_event(&event, Sao_Paulo).unwrap();

        assert_eq!(decoded.room_name, "Auditório Bloco Sul");
        assert_eq!(decoded.teacher, UNKNOWN_TEACHER);
        assert_eq!(decoded.turma, "");
        assert_eq!(decoded.observacoes, None);
    }

    #[test]
    fn test_event_without_id_is_skipped() {
        let mut event = hand_made_event("Atelier de Artes - 6ºA - Artes", None, None);
        event.id = None;
        assert!(decode_event(&event, Sao_Paulo).is_none());
    }

    #[test]
    fn test_day_window_in_sao_paulo() {
        let (start, end) = day_window(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), Sao_Paulo).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap());
        assert_eq!(end.to_rfc3339(), "2024-05-02T02:59:59.999+00:00");
    }

    #[test]
    fn test_day_window_survives_midnight_dst_gap() {
        // Brazil started DST at local midnight on 2018-11-04.
        let (start, _) = day_window(NaiveDate::from_ymd_opt(2018, 11, 4).unwrap(), Sao_Paulo).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap());
    }
}
