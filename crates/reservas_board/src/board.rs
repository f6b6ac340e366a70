// --- File: crates/reservas_board/src/board.rs ---
use chrono::{NaiveDate, NaiveTime};
use reservas_common::availability::{find_conflict, OverlapPolicy};
use reservas_common::catalog::Catalog;
use reservas_common::filter::{CategoryFilter, RoomFilter};
use reservas_common::models::{hhmm, Reservation};
use tracing::{debug, info, warn};

use crate::client::GatewayClient;
use crate::error::BoardError;
use crate::form::{BookingForm, MAX_DURATION_HOURS};
use crate::grid::{is_owned_by, reservation_lines, room_cards, ReservationLine, RoomCard};

/// Board state: selected day, filter and duration, who is logged in, and
/// the reservations loaded for that day.
pub struct BookingBoard<C: GatewayClient> {
    gateway: C,
    catalog: Catalog,
    policy: OverlapPolicy,
    date: NaiveDate,
    filter: RoomFilter,
    duration: u32,
    user: Option<String>,
    reservations: Vec<Reservation>,
    form: Option<BookingForm>,
}

impl<C: GatewayClient> BookingBoard<C> {
    pub fn new(gateway: C, catalog: Catalog, policy: OverlapPolicy, date: NaiveDate) -> Self {
        Self {
            gateway,
            catalog,
            policy,
            date,
            filter: RoomFilter::default(),
            duration: 1,
            user: None,
            reservations: Vec::new(),
            form: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn form(&self) -> Option<&BookingForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut BookingForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Asks the gateway who is logged in.
    pub async fn refresh_session(&mut self) -> Result<bool, BoardError> {
        let status = self.gateway.session().await?;
        self.user = status.user.filter(|_| status.authenticated);
        Ok(self.is_authenticated())
    }

    pub fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_duration(&mut self, hours: u32) -> Result<(), BoardError> {
        if !(1..=MAX_DURATION_HOURS).contains(&hours) {
            return Err(BoardError::Validation(format!(
                "Duração deve ser entre 1 e {} horas",
                MAX_DURATION_HOURS
            )));
        }
        self.duration = hours;
        Ok(())
    }

    /// Switches day. The cached list belongs to the old day and is dropped.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<(), BoardError> {
        self.date = date;
        self.reservations.clear();
        self.form = None;
        self.reload().await
    }

    pub fn cards(&self) -> Vec<RoomCard> {
        room_cards(
            &self.catalog,
            &self.filter,
            &self.reservations,
            self.date,
            self.duration,
            self.policy,
        )
    }

    pub fn lines(&self) -> Vec<ReservationLine> {
        reservation_lines(&self.reservations, self.date, self.user.as_deref())
    }

    fn require_login(&self) -> Result<(), BoardError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(BoardError::NotAuthenticated)
        }
    }

    // A 401 from the gateway means the session is gone.
    fn note_failure(&mut self, err: BoardError) -> BoardError {
        if err.is_unauthorized() {
            warn!("Session rejected by the gateway, logging out locally");
            self.user = None;
            self.form = None;
        }
        err
    }

    /// Reloads the reservations of the selected day.
    pub async fn reload(&mut self) -> Result<(), BoardError> {
        self.require_login()?;
        match self.gateway.list(self.date).await {
            Ok(reservations) => {
                debug!("Loaded {} reservations for {}", reservations.len(), self.date);
                self.reservations = reservations;
                Ok(())
            }
            Err(e) => Err(self.note_failure(e)),
        }
    }

    /// Opens the booking form on a free slot.
    pub fn open_booking(&mut self, room_id: u32, time: NaiveTime) -> Result<&BookingForm, BoardError> {
        self.require_login()?;
        let room = self
            .catalog
            .room_by_id(room_id)
            .ok_or_else(|| BoardError::Validation(format!("Sala desconhecida: {}", room_id)))?;
        if !self.catalog.is_slot(time) {
            return Err(BoardError::Validation(format!(
                "Horário fora da grade: {}",
                time.format(hhmm::FORMAT)
            )));
        }
        if let Some(clash) = find_conflict(
            &self.reservations,
            room,
            self.date,
            time,
            self.duration,
            self.policy,
        ) {
            return Err(BoardError::SlotTaken(format!(
                "{} já está reservada às {} ({} - {})",
                room.name,
                clash.time.format(hhmm::FORMAT),
                clash.turma,
                clash.materia
            )));
        }

        Ok(self
            .form
            .insert(BookingForm::new(room.clone(), self.date, time, self.duration)))
    }

    /// Sends the open form and reloads the day.
    pub async fn confirm_booking(&mut self) -> Result<Reservation, BoardError> {
        self.require_login()?;
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| BoardError::Validation("Nenhuma reserva em andamento".to_string()))?;
        let request = form.validate(None)?;

        let created = match self.gateway.create(&request).await {
            Ok(created) => created,
            Err(e) => return Err(self.note_failure(e)),
        };
        info!("Reservation {} confirmed", created.id);
        self.form = None;
        if created.date == self.date {
            self.reservations.push(created.clone());
        }
        self.reload_after_change().await;
        Ok(created)
    }

    /// Cancels one of the current user's reservations and reloads the day.
    pub async fn cancel_booking(&mut self, event_id: &str) -> Result<(), BoardError> {
        self.require_login()?;
        let reservation = self
            .reservations
            .iter()
            .find(|r| r.id == event_id)
            .ok_or_else(|| BoardError::UnknownReservation(event_id.to_string()))?;
        if !is_owned_by(reservation, self.user.as_deref()) {
            return Err(BoardError::NotOwner);
        }

        if let Err(e) = self.gateway.delete(event_id).await {
            return Err(self.note_failure(e));
        }
        info!("Reservation {} cancelled", event_id);
        self.reservations.retain(|r| r.id != event_id);
        self.reload_after_change().await;
        Ok(())
    }

    // The change already happened on the gateway; a failed reload only leaves
    // the locally updated list in place.
    async fn reload_after_change(&mut self) {
        if let Err(e) = self.reload().await {
            warn!("Reload after change failed: {}", e);
        }
    }
}
