// --- File: crates/reservas_common/src/services.rs ---
//! Service abstractions for the external calendar.
//!
//! The booking gateway only talks to the calendar through [`CalendarService`],
//! so the Google implementation can be swapped for an in-memory one in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Calendar operations needed to persist reservations.
///
/// Every call carries the caller's OAuth access token; the service itself
/// holds no credentials.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Events starting inside `[start, end]`, recurring events expanded,
    /// ordered by start time. Cancelled events are not returned.
    fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error>;

    /// Insert an event and return it as stored, including its new id.
    fn create_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEvent, Self::Error>;

    /// Remove an event. Succeeds when the event is already gone.
    fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, (), Self::Error>;
}

/// Provider-neutral calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Assigned by the provider; `None` before insertion.
    pub id: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA zone name the provider should display the event in.
    pub time_zone: Option<String>,
    pub color_id: Option<String>,
    /// Application-private key/value pairs stored with the event.
    #[serde(default)]
    pub private_properties: BTreeMap<String, String>,
    pub status: Option<String>,
}
