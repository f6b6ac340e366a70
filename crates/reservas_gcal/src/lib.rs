// --- File: crates/reservas_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

pub use handlers::GcalState;
pub use logic::{BookingLocks, BookingSettings, GcalError};
pub use routes::routes;
pub use service::{GcalServiceError, GoogleCalendarService};
