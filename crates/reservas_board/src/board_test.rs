#[cfg(test)]
mod tests {
    use crate::board::BookingBoard;
    use crate::client::MockGatewayClient;
    use crate::error::{BoardError, LOGIN_REQUIRED_MESSAGE};
    use chrono::{NaiveDate, NaiveTime};
    use mockall::predicate::eq;
    use reservas_common::availability::OverlapPolicy;
    use reservas_common::catalog::Catalog;
    use reservas_common::filter::CategoryFilter;
    use reservas_common::models::{Reservation, RoomCategory, SessionStatus};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn at(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn booked(id: &str, room_id: u32, time: NaiveTime, owner: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            room_id: Some(room_id),
            room_name: Catalog::builtin().room_by_id(room_id).unwrap().name.clone(),
            date: day(),
            time,
            duration: 1,
            teacher: "Joana".to_string(),
            turma: "2ºA".to_string(),
            materia: "Artes".to_string(),
            observacoes: None,
            owner: Some(owner.to_string()),
        }
    }

    fn board(gateway: MockGatewayClient) -> BookingBoard<MockGatewayClient> {
        BookingBoard::new(gateway, Catalog::builtin(), OverlapPolicy::Interval, day())
    }

    #[tokio::test]
    async fn test_logged_out_actions_never_reach_the_gateway() {
        let mut gateway = MockGatewayClient::new();
        gateway.expect_list().times(0);
        gateway.expect_create().times(0);
        gateway.expect_delete().times(0);
        let mut board = board(gateway);

        let err = board.open_booking(1, at(10, 0)).unwrap_err();
        assert_eq!(err.to_string(), LOGIN_REQUIRED_MESSAGE);
        assert!(matches!(board.confirm_booking().await, Err(BoardError::NotAuthenticated)));
        assert!(matches!(board.cancel_booking("e1").await, Err(BoardError::NotAuthenticated)));
        assert!(matches!(board.reload().await, Err(BoardError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_refresh_session_reads_gateway_status() {
        let mut gateway = MockGatewayClient::new();
        gateway.expect_session().times(1).returning(|| {
            Ok(SessionStatus {
                authenticated: true,
                user: Some("joana@escola.br".to_string()),
            })
        });
        let mut board = board(gateway);

        assert!(board.refresh_session().await.unwrap());
        assert_eq!(board.user(), Some("joana@escola.br"));
    }

    #[tokio::test]
    async fn test_booking_flow_creates_and_reloads() {
        let mut gateway = MockGatewayClient::new();
        gateway
            .expect_create()
            .withf(|r| r.space_id == Some(1) && r.time == "10:00" && r.turma == "2ºA")
            .times(1)
            .returning(|_| Ok(booked("new", 1, NaiveTime::from_hms_opt(10, 0, 0).unwrap(), "joana@escola.br")));
        gateway
            .expect_list()
            .with(eq(day()))
            .times(1)
            .returning(|_| Ok(vec![booked("new", 1, NaiveTime::from_hms_opt(10, 0, 0).unwrap(), "joana@escola.br")]));
        let mut board = board(gateway);
        board.set_user(Some("joana@escola.br".to_string()));

        board.open_booking(1, at(10, 0)).unwrap();
        let form = board.form_mut().unwrap();
        form.turma = "2ºA".to_string();
        form.materia = "Artes".to_string();

        let created = board.confirm_booking().await.unwrap();

        assert_eq!(created.id, "new");
        assert!(board.form().is_none());
        assert_eq!(board.lines().len(), 1);
        assert!(board.lines()[0].cancellable);
        assert!(!board.cards()[0].slot(at(10, 0)).unwrap().available);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let mut gateway = MockGatewayClient::new();
        gateway.expect_create().times(0);
        let mut board = board(gateway);
        board.set_user(Some("joana@escola.br".to_string()));

        board.open_booking(2, at(7, 30)).unwrap();
        let err = board.confirm_booking().await.unwrap_err();

        assert_eq!(err.to_string(), "Por favor, preencha turma e matéria");
        assert!(board.form().is_some());
    }

    #[tokio::test]
    async fn test_busy_slot_cannot_be_opened() {
        let mut gateway = MockGatewayClient::new();
        gateway
            .expect_list()
            .returning(|_| Ok(vec![booked("e1", 3, NaiveTime::from_hms_opt(13, 15, 0).unwrap(), "x@escola.br")]));
        let mut board = board(gateway);
        board.set_user(Some("joana@escola.br".to_string()));
        board.reload().await.unwrap();

        assert!(matches!(board.open_booking(3, at(13, 15)), Err(BoardError::SlotTaken(_))));
        // 14:00 starts before the 13:15 booking ends.
        assert!(board.open_booking(3, at(14, 0)).is_err());
        assert!(board.open_booking(3, at(15, 0)).is_ok());

        board.set_duration(2).unwrap();
        assert!(board.open_booking(3, at(11, 45)).is_err());
        assert!(board.set_duration(5).is_err());
    }

    #[tokio::test]
    async fn test_cancel_only_own_reservations() {
        let mut gateway = MockGatewayClient::new();
        gateway.expect_list().returning(|_| {
            Ok(vec![
                booked("mine", 4, NaiveTime::from_hms_opt(8, 15, 0).unwrap(), "joana@escola.br"),
                booked("theirs", 5, NaiveTime::from_hms_opt(8, 15, 0).unwrap(), "pedro@escola.br"),
            ])
        });
        gateway
            .expect_delete()
            .withf(|id| id.to_string() == "mine")
            .times(1)
            .returning(|_| Ok(()));
        let mut board = board(gateway);
        board.set_user(Some("joana@escola.br".to_string()));
        board.reload().await.unwrap();

        assert!(matches!(board.cancel_booking("theirs").await, Err(BoardError::NotOwner)));
        assert!(matches!(
            board.cancel_booking("missing").await,
            Err(BoardError::UnknownReservation(_))
        ));
        board.cancel_booking("mine").await.unwrap();
    }

    #[tokio::test]
    async fn test_gateway_401_logs_out() {
        let mut gateway = MockGatewayClient::new();
        gateway.expect_list().returning(|_| {
            Err(BoardError::Gateway {
                status_code: 401,
                message: "Sessão expirada, faça login novamente".to_string(),
            })
        });
        let mut board = board(gateway);
        board.set_user(Some("joana@escola.br".to_string()));
        board.set_category(CategoryFilter::Only(RoomCategory::Laboratory));

        assert!(board.reload().await.is_err());
        assert!(!board.is_authenticated());
        assert_eq!(board.cards().len(), 4);
    }

    #[tokio::test]
    async fn test_confirmed_booking_survives_failed_reload() {
        let mut gateway = MockGatewayClient::new();
        gateway
            .expect_create()
            .times(1)
            .returning(|_| Ok(booked("evt-1", 6, NaiveTime::from_hms_opt(9, 15, 0).unwrap(), "joana@escola.br")));
        gateway.expect_list().times(1).returning(|_| {
            Err(BoardError::Gateway {
                status_code: 500,
                message: "Backend Error".to_string(),
            })
        });
        let mut board = board(gateway);
        board.set_user(Some("joana@escola.br".to_string()));

        board.open_booking(6, at(9, 15)).unwrap();
        let form = board.form_mut().unwrap();
        form.turma = "2ºA".to_string();
        form.materia = "Artes".to_string();

        let created = board.confirm_booking().await.unwrap();

        assert_eq!(created.id, "evt-1");
        assert!(board.form().is_none());
        assert!(board.is_authenticated());
        // The new booking is shown even though the list could not be fetched.
        assert_eq!(board.lines().len(), 1);
        assert!(matches!(board.open_booking(6, at(9, 15)), Err(BoardError::SlotTaken(_))));
    }

    #[tokio::test]
    async fn test_cancelled_booking_survives_failed_reload() {
        let mut gateway = MockGatewayClient::new();
        let mut seq = mockall::Sequence::new();
        gateway
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![booked("mine", 4, NaiveTime::from_hms_opt(8, 15, 0).unwrap(), "joana@escola.br")]));
        gateway
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        gateway
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(BoardError::Gateway {
                    status_code: 503,
                    message: "Backend Error".to_string(),
                })
            });
        let mut board = board(gateway);
        board.set_user(Some("joana@escola.br".to_string()));
        board.reload().await.unwrap();

        board.cancel_booking("mine").await.unwrap();

        assert!(board.lines().is_empty());
    }
}
