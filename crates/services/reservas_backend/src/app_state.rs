// --- File: crates/services/reservas_backend/src/app_state.rs ---
use reservas_auth::{AuthSettings, Authenticator, GoogleOAuthClient};
use reservas_common::catalog::Catalog;
use reservas_config::AppConfig;
use reservas_gcal::auth::create_http_client;
use reservas_gcal::{BookingSettings, GcalState, GoogleCalendarService};
use std::error::Error;
use std::sync::Arc;
use tracing::info;

/// Everything the routers share, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub auth: Arc<Authenticator>,
    pub gcal: Arc<GcalState>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let catalog = Arc::new(Catalog::from_config(config.catalog.as_ref())?);

        let redirect_url = config.server.oauth_redirect_url();
        info!("OAuth callback: {}", redirect_url);
        let provider = GoogleOAuthClient::new(&config.google, redirect_url)?;
        let auth = Arc::new(Authenticator::new(
            Arc::new(provider),
            AuthSettings::from_config(&config.session),
        ));

        let settings = BookingSettings::from_config(config)?;
        info!(
            "Booking on calendar {} ({}, {:?} overlap)",
            settings.calendar_id, settings.time_zone, settings.policy
        );
        let calendar = Arc::new(GoogleCalendarService::new(create_http_client()?));
        let gcal = Arc::new(GcalState::new(
            settings,
            catalog.clone(),
            auth.clone(),
            calendar,
        ));

        Ok(Self {
            catalog,
            auth,
            gcal,
        })
    }
}
