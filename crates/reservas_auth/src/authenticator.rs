// --- File: crates/reservas_auth/src/authenticator.rs ---
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use cookie::Cookie;
use reservas_config::SessionConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::oauth::{TokenProvider, UserIdentity};
use crate::session::{
    removal_cookie, session_cookie, session_id_from_headers, Session, SessionStore,
};

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub cookie_name: String,
    pub session_ttl: Duration,
    pub secure_cookie: bool,
}

impl AuthSettings {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            session_ttl: Duration::hours(config.ttl_hours),
            secure_cookie: config.secure_cookie,
        }
    }
}

/// The caller behind a request, with a usable access token.
#[derive(Debug, Clone)]
pub struct AuthorizedUser {
    pub session_id: String,
    pub user: UserIdentity,
    pub access_token: String,
}

pub struct Authenticator {
    provider: Arc<dyn TokenProvider>,
    sessions: SessionStore,
    settings: AuthSettings,
}

impl Authenticator {
    pub fn new(provider: Arc<dyn TokenProvider>, settings: AuthSettings) -> Self {
        Self {
            provider,
            sessions: SessionStore::new(settings.session_ttl),
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// Starts a login and returns the provider URL to redirect to.
    pub async fn begin_login(&self) -> Result<String, AuthError> {
        let redirect = self.provider.login_redirect()?;
        self.sessions
            .remember_pending(redirect.csrf_state, redirect.pkce_verifier)
            .await;
        Ok(redirect.url)
    }

    /// Finishes a login: verifies `state`, exchanges `code` and opens a session.
    pub async fn complete_login(&self, code: &str, state: &str) -> Result<Session, AuthError> {
        let verifier = self
            .sessions
            .take_pending(state)
            .await
            .ok_or(AuthError::InvalidState)?;

        let grant = self.provider.exchange_code(code, &verifier).await?;
        let user = self.provider.user_identity(&grant.access_token).await?;
        let session = self.sessions.create(user, grant).await;
        info!(user = %session.user.email, "Login completed");
        Ok(session)
    }

    /// Resolves the session cookie into a user with a fresh access token.
    ///
    /// Tokens within a minute of expiry are refreshed first. A session whose
    /// refresh fails is dropped.
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<AuthorizedUser, AuthError> {
        let session_id = session_id_from_headers(headers, &self.settings.cookie_name)
            .ok_or(AuthError::MissingSession)?;
        let mut session = self
            .sessions
            .get(&session_id)
            .await
            .ok_or(AuthError::SessionExpired)?;

        if session.grant.needs_refresh(Utc::now()) {
            session = self.refresh_session(session).await?;
        }

        Ok(AuthorizedUser {
            session_id: session.id,
            user: session.user,
            access_token: session.grant.access_token,
        })
    }

    async fn refresh_session(&self, session: Session) -> Result<Session, AuthError> {
        let Some(refresh_token) = session.grant.refresh_token.clone() else {
            self.sessions.remove(&session.id).await;
            return Err(AuthError::SessionExpired);
        };

        match self.provider.refresh(&refresh_token).await {
            Ok(mut grant) => {
                // Google only returns a refresh token on the first exchange.
                if grant.refresh_token.is_none() {
                    grant.refresh_token = Some(refresh_token);
                }
                self.sessions
                    .update_grant(&session.id, grant)
                    .await
                    .ok_or(AuthError::SessionExpired)
            }
            Err(e) => {
                warn!(user = %session.user.email, "Token refresh failed: {}", e);
                self.sessions.remove(&session.id).await;
                Err(AuthError::SessionExpired)
            }
        }
    }

    pub async fn current_user(&self, headers: &HeaderMap) -> Option<UserIdentity> {
        self.resolve(headers).await.ok().map(|u| u.user)
    }

    /// Ends the caller's session. Revocation at the provider is best effort.
    pub async fn logout(&self, headers: &HeaderMap) -> bool {
        let Some(session_id) = session_id_from_headers(headers, &self.settings.cookie_name) else {
            return false;
        };
        let Some(session) = self.sessions.remove(&session_id).await else {
            return false;
        };

        if let Err(e) = self.provider.revoke(&session.grant.access_token).await {
            warn!(user = %session.user.email, "Token revocation failed: {}", e);
        }
        info!(user = %session.user.email, "Logged out");
        true
    }

    pub fn session_cookie(&self, session_id: &str) -> Cookie<'static> {
        session_cookie(
            &self.settings.cookie_name,
            session_id,
            self.settings.session_ttl,
            self.settings.secure_cookie,
        )
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        removal_cookie(&self.settings.cookie_name, self.settings.secure_cookie)
    }
}
