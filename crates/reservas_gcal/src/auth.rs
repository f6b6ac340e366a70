// File: crates/reservas_gcal/src/auth.rs
//! HTTPS client for the Calendar API.
//!
//! One connection pool is shared by every request; each call builds a
//! [`CalendarHub`] around the caller's own access token.
use google_calendar3::{
    common::Client,
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    CalendarHub,
};
use std::error::Error;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;
pub type HttpClient = Client<Connector>;

pub fn create_http_client() -> Result<HttpClient, Box<dyn Error + Send + Sync>> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new()).build(https))
}

/// A hub that authenticates every request with `access_token`.
pub fn hub_for(client: &HttpClient, access_token: &str) -> HubType {
    CalendarHub::new(client.clone(), access_token.to_string())
}
