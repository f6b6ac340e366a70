// --- File: crates/reservas_auth/src/session.rs ---
//! In-memory session and pending-login store, plus the session cookie.
//!
//! Sessions are keyed by a random id carried in an HttpOnly cookie. Expired
//! entries are pruned lazily whenever the store is written to.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use cookie::{Cookie, SameSite};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::oauth::{TokenGrant, UserIdentity};

/// How long a login started with `GET /api/auth` may take to come back.
pub const PENDING_LOGIN_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user: UserIdentity,
    pub grant: TokenGrant,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct PendingLogin {
    pkce_verifier: String,
    started_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    pending: Arc<RwLock<HashMap<String, PendingLogin>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            pending: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn remember_pending(&self, csrf_state: String, pkce_verifier: String) {
        let now = Utc::now();
        let mut pending = self.pending.write().await;
        pending.retain(|_, p| !pending_expired(p, now));
        pending.insert(
            csrf_state,
            PendingLogin {
                pkce_verifier,
                started_at: now,
            },
        );
    }

    /// Consumes the pending login for `csrf_state`, returning its PKCE verifier.
    /// A state can only be used once.
    pub async fn take_pending(&self, csrf_state: &str) -> Option<String> {
        let pending = self.pending.write().await.remove(csrf_state)?;
        if pending_expired(&pending, Utc::now()) {
            debug!("Pending login expired");
            return None;
        }
        Some(pending.pkce_verifier)
    }

    pub async fn create(&self, user: UserIdentity, grant: TokenGrant) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().simple().to_string(),
            user,
            grant,
            expires_at: now + self.ttl,
        };
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(session.id.clone(), session.clone());
        session
    }

    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(session_id).cloned()?;
        if session.expires_at <= Utc::now() {
            self.sessions.write().await.remove(session_id);
            return None;
        }
        Some(session)
    }

    /// Stores fresh credentials for an existing session.
    pub async fn update_grant(&self, session_id: &str, grant: TokenGrant) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(session_id)?;
        session.grant = grant;
        Some(session.clone())
    }

    pub async fn remove(&self, session_id: &str) -> Option<Session> {
        self.sessions.write().await.remove(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn pending_expired(pending: &PendingLogin, now: DateTime<Utc>) -> bool {
    pending.started_at + Duration::minutes(PENDING_LOGIN_TTL_MINUTES) <= now
}

/// Value of the cookie `name` from the request's `Cookie` headers.
pub fn session_id_from_headers(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

pub fn session_cookie(name: &str, session_id: &str, ttl: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(cookie::time::Duration::seconds(ttl.num_seconds()))
        .build()
}

pub fn removal_cookie(name: &str, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((name.to_string(), String::new()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build();
    cookie.make_removal();
    cookie
}
