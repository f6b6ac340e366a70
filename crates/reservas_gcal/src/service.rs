// --- File: crates/reservas_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use chrono::{DateTime, NaiveDate, Utc};
use google_calendar3::api::{Event, EventDateTime, EventExtendedProperties};
use reservas_common::http::client::DEFAULT_TIMEOUT_SECS;
use reservas_common::services::{BoxFuture, CalendarEvent, CalendarService};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::{hub_for, HttpClient};

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Calendar returned an unusable event: {0}")]
    Conversion(String),
    #[error("{0}")]
    Provider(String),
    #[error("Google Calendar did not answer within {0} s")]
    Timeout(u64),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    client: HttpClient,
    timeout: Duration,
}

impl GoogleCalendarService {
    /// Every API call is abandoned after `DEFAULT_TIMEOUT_SECS`.
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Runs one API call, failing with [`GcalServiceError::Timeout`] once
/// `timeout` has passed.
pub async fn within_deadline<T, F>(timeout: Duration, call: F) -> Result<T, GcalServiceError>
where
    F: Future<Output = Result<T, google_calendar3::Error>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(GcalServiceError::from),
        Err(_) => Err(GcalServiceError::Timeout(timeout.as_secs())),
    }
}

/// Whether the API reported the resource as missing or already deleted.
pub fn is_gone(err: &google_calendar3::Error) -> bool {
    match err {
        google_calendar3::Error::Failure(response) => {
            matches!(response.status().as_u16(), 404 | 410)
        }
        google_calendar3::Error::BadRequest(body) => matches!(
            body.pointer("/error/code").and_then(|c| c.as_u64()),
            Some(404) | Some(410)
        ),
        _ => false,
    }
}

fn event_time(at: DateTime<Utc>, time_zone: &Option<String>) -> EventDateTime {
    EventDateTime {
        date_time: Some(at),
        time_zone: time_zone.clone(),
        ..Default::default()
    }
}

// All-day events carry only a date; they are read as starting at midnight UTC.
fn instant_of(time: &Option<EventDateTime>) -> Option<DateTime<Utc>> {
    let time = time.as_ref()?;
    time.date_time.or_else(|| {
        time.date
            .and_then(|d: NaiveDate| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    })
}

pub fn to_google_event(event: &CalendarEvent) -> Event {
    let private: HashMap<String, String> = event
        .private_properties
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Event {
        summary: Some(event.summary.clone()),
        description: event.description.clone(),
        location: event.location.clone(),
        color_id: event.color_id.clone(),
        start: Some(event_time(event.start, &event.time_zone)),
        end: Some(event_time(event.end, &event.time_zone)),
        extended_properties: (!private.is_empty()).then(|| EventExtendedProperties {
            private: Some(private),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn from_google_event(event: Event) -> Result<CalendarEvent, GcalServiceError> {
    let start = instant_of(&event.start).ok_or_else(|| {
        GcalServiceError::Conversion(format!("event {:?} has no start", event.id))
    })?;
    let end = instant_of(&event.end).unwrap_or(start);

    let private_properties: BTreeMap<String, String> = event
        .extended_properties
        .and_then(|p| p.private)
        .map(|p| p.into_iter().collect())
        .unwrap_or_default();

    Ok(CalendarEvent {
        id: event.id,
        summary: event.summary.unwrap_or_default(),
        description: event.description,
        location: event.location,
        start,
        end,
        time_zone: event.start.and_then(|s| s.time_zone),
        color_id: event.color_id,
        private_properties,
        status: event.status,
    })
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Pages through `events.list` with recurring events expanded. Cancelled
    /// instances and events without a usable start are dropped.
    fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        let hub = hub_for(&self.client, access_token);
        let calendar_id = calendar_id.to_string();
        let timeout = self.timeout;

        Box::pin(async move {
            let mut events = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut request = hub
                    .events()
                    .list(&calendar_id)
                    .time_min(start)
                    .time_max(end)
                    .single_events(true)
                    .order_by("startTime");
                if let Some(token) = page_token.as_deref() {
                    request = request.page_token(token);
                }

                let (_response, page) = within_deadline(timeout, request.doit()).await?;

                for item in page.items.unwrap_or_default() {
                    if item.status.as_deref() == Some("cancelled") {
                        continue;
                    }
                    match from_google_event(item) {
                        Ok(event) => events.push(event),
                        Err(e) => debug!("Skipping event: {}", e),
                    }
                }

                match page.next_page_token {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }

            Ok(events)
        })
    }

    fn create_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEvent, Self::Error> {
        let hub = hub_for(&self.client, access_token);
        let calendar_id = calendar_id.to_string();

        let timeout = self.timeout;

        Box::pin(async move {
            let insert = hub.events().insert(to_google_event(&event), &calendar_id);
            let (_response, created) = within_deadline(timeout, insert.doit()).await?;
            info!("Created calendar event {:?}", created.id);
            from_google_event(created)
        })
    }

    /// Deletes the event. A 404 or 410 means it is already gone, which counts
    /// as success.
    fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, (), Self::Error> {
        let hub = hub_for(&self.client, access_token);
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        let timeout = self.timeout;

        Box::pin(async move {
            let delete = hub.events().delete(&calendar_id, &event_id);
            match within_deadline(timeout, delete.doit()).await {
                Ok(_) => {
                    info!("Deleted calendar event {}", event_id);
                    Ok(())
                }
                Err(GcalServiceError::ApiError(e)) if is_gone(&e) => {
                    debug!("Event {} already gone", event_id);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        })
    }
}
