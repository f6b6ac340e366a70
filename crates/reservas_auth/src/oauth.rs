// --- File: crates/reservas_auth/src/oauth.rs ---
//! Google authorization-code flow with PKCE.
//!
//! [`TokenProvider`] is the seam between the session logic and the identity
//! provider; [`GoogleOAuthClient`] is the production implementation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use oauth2::{
    basic::{BasicClient, BasicTokenResponse},
    AccessToken, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet,
    EndpointSet, PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, RefreshToken, RevocationUrl,
    Scope, StandardRevocableToken, TokenResponse, TokenUrl,
};
use reservas_common::http::client::{create_client, DEFAULT_TIMEOUT_SECS};
use reservas_config::GoogleConfig;
use serde::Deserialize;
use tracing::debug;

use crate::error::AuthError;

pub const SCOPES: [&str; 4] = [
    "https://www.googleapis.com/auth/calendar.events",
    "https://www.googleapis.com/auth/calendar.readonly",
    "openid",
    "email",
];

/// Access tokens are treated as expired this long before their real expiry.
pub const REFRESH_SKEW_SECS: i64 = 60;

/// Used when the provider omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenGrant {
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_SKEW_SECS) <= now
    }
}

/// Where to send the browser, plus what must be remembered until it returns.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub url: String,
    pub csrf_state: String,
    pub pkce_verifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserIdentity {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserIdentity {
    /// Name shown as the default teacher on new bookings.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    fn login_redirect(&self) -> Result<LoginRedirect, AuthError>;

    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<TokenGrant, AuthError>;

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AuthError>;

    async fn revoke(&self, access_token: &str) -> Result<(), AuthError>;

    async fn user_identity(&self, access_token: &str) -> Result<UserIdentity, AuthError>;
}

type GoogleClient = BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointSet, EndpointSet>;

pub struct GoogleOAuthClient {
    client: GoogleClient,
    http: reqwest::Client,
    userinfo_url: String,
}

impl GoogleOAuthClient {
    pub fn new(google: &GoogleConfig, redirect_url: String) -> Result<Self, AuthError> {
        let invalid = |what: &str, e: oauth2::url::ParseError| {
            AuthError::Config(format!("invalid {}: {}", what, e))
        };

        let client = BasicClient::new(ClientId::new(google.client_id.clone()))
            .set_client_secret(ClientSecret::new(google.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(google.auth_url.clone()).map_err(|e| invalid("auth_url", e))?)
            .set_token_uri(
                TokenUrl::new(google.token_url.clone()).map_err(|e| invalid("token_url", e))?,
            )
            .set_redirect_uri(RedirectUrl::new(redirect_url).map_err(|e| invalid("redirect url", e))?)
            .set_revocation_url(
                RevocationUrl::new(google.revocation_url.clone())
                    .map_err(|e| invalid("revocation_url", e))?,
            );

        // Token endpoints must not follow redirects.
        let http = create_client(DEFAULT_TIMEOUT_SECS, false)?;

        Ok(Self {
            client,
            http,
            userinfo_url: google.userinfo_url.clone(),
        })
    }

    fn grant_from(token: &BasicTokenResponse) -> TokenGrant {
        let lifetime = token
            .expires_in()
            .and_then(|d| Duration::from_std(d).ok())
            .unwrap_or_else(|| Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS));
        TokenGrant {
            access_token: token.access_token().secret().clone(),
            refresh_token: token.refresh_token().map(|r| r.secret().clone()),
            expires_at: Utc::now() + lifetime,
        }
    }
}

#[async_trait]
impl TokenProvider for GoogleOAuthClient {
    fn login_redirect(&self) -> Result<LoginRedirect, AuthError> {
        let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();
        let (url, state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(SCOPES.iter().map(|s| Scope::new(s.to_string())))
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent")
            .set_pkce_challenge(challenge)
            .url();

        Ok(LoginRedirect {
            url: url.to_string(),
            csrf_state: state.secret().clone(),
            pkce_verifier: verifier.secret().clone(),
        })
    }

    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<TokenGrant, AuthError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;
        debug!("Authorization code exchanged");
        Ok(Self::grant_from(&token))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AuthError> {
        let token = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;
        debug!("Access token refreshed");
        Ok(Self::grant_from(&token))
    }

    async fn revoke(&self, access_token: &str) -> Result<(), AuthError> {
        self.client
            .revoke_token(StandardRevocableToken::AccessToken(AccessToken::new(
                access_token.to_string(),
            )))
            .map_err(|e| AuthError::Config(e.to_string()))?
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))
    }

    async fn user_identity(&self, access_token: &str) -> Result<UserIdentity, AuthError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(format!(
                "userinfo returned {}: {}",
                status, body
            )));
        }

        Ok(response.json::<UserIdentity>().await?)
    }
}
