// --- File: crates/reservas_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL of the deployment; the OAuth callback hangs off it.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Directory with the built front-end, served at `/` when set.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl ServerConfig {
    /// Base URL used to build redirect targets.
    ///
    /// Falls back to `https://$VERCEL_URL` for hosted deployments and to
    /// `http://localhost:3000` otherwise.
    pub fn public_base_url(&self) -> String {
        if let Some(url) = self.public_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return url.trim_end_matches('/').to_string();
        }
        match std::env::var("VERCEL_URL") {
            Ok(host) if !host.trim().is_empty() => format!("https://{}", host.trim()),
            _ => DEFAULT_PUBLIC_URL.to_string(),
        }
    }

    /// Callback registered with the identity provider.
    pub fn oauth_redirect_url(&self) -> String {
        format!("{}/api/auth/callback", self.public_base_url())
    }
}

pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

// --- Google Config ---
// client_id, client_secret and calendar_id are normally "secret_from_env" markers.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub calendar_id: String,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_color_id")]
    pub color_id: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_revocation_url")]
    pub revocation_url: String,
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
}

fn default_time_zone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_color_id() -> String {
    "9".to_string()
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_revocation_url() -> String {
    "https://oauth2.googleapis.com/revoke".to_string()
}

fn default_userinfo_url() -> String {
    "https://openidconnect.googleapis.com/v1/userinfo".to_string()
}

// --- Booking Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// "interval" (default) or "start_slot".
    #[serde(default = "default_overlap_policy")]
    pub overlap_policy: String,
    #[serde(default = "default_max_duration_hours")]
    pub max_duration_hours: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            overlap_policy: default_overlap_policy(),
            max_duration_hours: default_max_duration_hours(),
        }
    }
}

fn default_overlap_policy() -> String {
    "interval".to_string()
}

fn default_max_duration_hours() -> u32 {
    4
}

// --- Session Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_hours: default_ttl_hours(),
            secure_cookie: false,
        }
    }
}

fn default_cookie_name() -> String {
    "reservas_session".to_string()
}

fn default_ttl_hours() -> i64 {
    12
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, a daily rolling log file is written here as well.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Catalog Override ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub rooms: Option<Vec<RoomConfig>>,
    /// Slot labels in "HH:MM".
    #[serde(default)]
    pub time_slots: Option<Vec<String>>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoomConfig {
    pub id: u32,
    pub name: String,
    /// "laboratory", "classroom" or "auditorium".
    pub category: String,
    pub capacity: u32,
    #[serde(default)]
    pub resources: Vec<String>,
}

// --- Unified App Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub google: GoogleConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}
