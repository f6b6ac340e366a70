// --- File: crates/reservas_board/src/client.rs ---
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client, Response};
use reservas_common::models::{MessageResponse, Reservation, ReservationRequest, SessionStatus};
use reservas_common::HTTP_CLIENT;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::BoardError;

/// The booking gateway as seen from the board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn list(&self, date: NaiveDate) -> Result<Vec<Reservation>, BoardError>;

    async fn create(&self, request: &ReservationRequest) -> Result<Reservation, BoardError>;

    async fn delete(&self, event_id: &str) -> Result<(), BoardError>;

    async fn session(&self) -> Result<SessionStatus, BoardError>;
}

/// Talks to `{base_url}/api/...` with the browser's session cookie.
pub struct HttpGatewayClient {
    client: Client,
    base_url: String,
    cookie: Option<String>,
}

impl HttpGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    /// `name=value` pair sent as the `Cookie` header.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }
}

/// Reads a JSON body, turning the gateway's `{"error": ...}` into
/// `BoardError::Gateway`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BoardError> {
    let status = response.status();
    let body_text = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body_text)?);
    }

    let message = match serde_json::from_str::<serde_json::Value>(&body_text) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|m| m.as_str())
            .unwrap_or(&body_text)
            .to_string(),
        Err(_) => body_text,
    };
    debug!("Gateway answered {}: {}", status, message);
    Err(BoardError::Gateway {
        status_code: status.as_u16(),
        message,
    })
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn list(&self, date: NaiveDate) -> Result<Vec<Reservation>, BoardError> {
        let response = self
            .request(reqwest::Method::GET, "/calendar")
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await?;
        read_json(response).await
    }

    async fn create(&self, request: &ReservationRequest) -> Result<Reservation, BoardError> {
        let response = self
            .request(reqwest::Method::POST, "/calendar")
            .json(request)
            .send()
            .await?;
        let created: Reservation = read_json(response).await?;
        info!("Booked {} at {} ({})", created.room_name, created.time, created.id);
        Ok(created)
    }

    async fn delete(&self, event_id: &str) -> Result<(), BoardError> {
        let response = self
            .request(reqwest::Method::DELETE, "/calendar")
            .query(&[("eventId", event_id)])
            .send()
            .await?;
        let _: MessageResponse = read_json(response).await?;
        Ok(())
    }

    async fn session(&self) -> Result<SessionStatus, BoardError> {
        let response = self
            .request(reqwest::Method::GET, "/auth/session")
            .send()
            .await?;
        read_json(response).await
    }
}
