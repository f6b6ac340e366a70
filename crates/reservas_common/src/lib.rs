// --- File: crates/reservas_common/src/lib.rs ---

// Domain model and shared plumbing for the reservas crates.
pub mod availability; // Free/busy rules
#[cfg(test)]
mod availability_proptest;
pub mod catalog; // Rooms and slots
pub mod codec; // Reservation <-> calendar event
#[cfg(test)]
mod codec_test;
pub mod error; // Error handling
pub mod filter; // Category/name room filter
pub mod handlers; // Health and catalog handlers
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Data structures
pub mod routes; // Route definitions
pub mod services; // Calendar service abstraction

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

pub use error::{
    config_error, conflict, external_service_error, validation_error, HttpStatusCode, ReservasError,
};

pub use http::{
    client::{create_client, HTTP_CLIENT},
    IntoHttpResponse,
};

pub use logging::init_from_config;
