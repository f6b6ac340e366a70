#[cfg(test)]
mod tests {
    use crate::authenticator::{AuthSettings, Authenticator};
    use crate::error::AuthError;
    use crate::oauth::{LoginRedirect, MockTokenProvider, TokenGrant, UserIdentity};
    use axum::http::{header, HeaderMap, HeaderValue};
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn settings() -> AuthSettings {
        AuthSettings {
            cookie_name: "reservas_session".to_string(),
            session_ttl: Duration::hours(12),
            secure_cookie: false,
        }
    }

    fn grant(access: &str, refresh: Option<&str>, expires_in: Duration) -> TokenGrant {
        TokenGrant {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            expires_at: Utc::now() + expires_in,
        }
    }

    fn ana() -> UserIdentity {
        UserIdentity {
            email: "ana@escola.br".to_string(),
            name: Some("Ana Souza".to_string()),
        }
    }

    fn cookie_headers(session_id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("reservas_session={}", session_id)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_full_login_flow() {
        let mut provider = MockTokenProvider::new();
        provider.expect_login_redirect().times(1).returning(|| {
            Ok(LoginRedirect {
                url: "https://accounts.google.com/o/oauth2/v2/auth?state=s1".to_string(),
                csrf_state: "s1".to_string(),
                pkce_verifier: "v1".to_string(),
            })
        });
        provider
            .expect_exchange_code()
            .times(1)
            .returning(|code, verifier| {
                assert_eq!(code, "auth-code");
                assert_eq!(verifier, "v1");
                Ok(grant("at-1", Some("rt-1"), Duration::hours(1)))
            });
        provider
            .expect_user_identity()
            .times(1)
            .returning(|_| Ok(ana()));

        let auth = Authenticator::new(Arc::new(provider), settings());

        let url = auth.begin_login().await.unwrap();
        assert!(url.contains("state=s1"));

        let session = auth.complete_login("auth-code", "s1").await.unwrap();
        assert_eq!(session.user.email, "ana@escola.br");

        let resolved = auth.resolve(&cookie_headers(&session.id)).await.unwrap();
        assert_eq!(resolved.access_token, "at-1");
        assert_eq!(resolved.user.display_name(), "Ana Souza");
    }

    #[tokio::test]
    async fn test_unknown_state_never_reaches_provider() {
        let mut provider = MockTokenProvider::new();
        provider.expect_exchange_code().times(0);
        provider.expect_user_identity().times(0);

        let auth = Authenticator::new(Arc::new(provider), settings());

        let err = auth.complete_login("auth-code", "forged").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidState));
        assert!(auth.sessions().is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_and_unknown_cookies() {
        let auth = Authenticator::new(Arc::new(MockTokenProvider::new()), settings());

        let err = auth.resolve(&HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingSession));

        let err = auth.resolve(&cookie_headers("nope")).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }

    #[tokio::test]
    async fn test_expiring_token_is_refreshed_and_keeps_refresh_token() {
        let mut provider = MockTokenProvider::new();
        provider.expect_refresh().times(1).returning(|refresh| {
            assert_eq!(refresh, "rt-1");
            Ok(grant("at-2", None, Duration::hours(1)))
        });

        let auth = Authenticator::new(Arc::new(provider), settings());
        // Expires inside the refresh window.
        let session = auth
            .sessions()
            .create(ana(), grant("at-1", Some("rt-1"), Duration::seconds(30)))
            .await;

        let resolved = auth.resolve(&cookie_headers(&session.id)).await.unwrap();
        assert_eq!(resolved.access_token, "at-2");

        let stored = auth.sessions().get(&session.id).await.unwrap();
        assert_eq!(stored.grant.refresh_token.as_deref(), Some("rt-1"));

        // Fresh now, so no second refresh.
        auth.resolve(&cookie_headers(&session.id)).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_refresh_drops_session() {
        let mut provider = MockTokenProvider::new();
        provider
            .expect_refresh()
            .times(1)
            .returning(|_| Err(AuthError::Exchange("invalid_grant".to_string())));

        let auth = Authenticator::new(Arc::new(provider), settings());
        let session = auth
            .sessions()
            .create(ana(), grant("at-1", Some("rt-1"), Duration::seconds(-5)))
            .await;

        let err = auth.resolve(&cookie_headers(&session.id)).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
        assert!(auth.sessions().get(&session.id).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token() {
        let mut provider = MockTokenProvider::new();
        provider.expect_refresh().times(0);

        let auth = Authenticator::new(Arc::new(provider), settings());
        let session = auth
            .sessions()
            .create(ana(), grant("at-1", None, Duration::seconds(-5)))
            .await;

        assert!(auth.resolve(&cookie_headers(&session.id)).await.is_err());
    }

    #[tokio::test]
    async fn test_logout_survives_revocation_failure() {
        let mut provider = MockTokenProvider::new();
        provider.expect_revoke().times(1).returning(|token| {
            assert_eq!(token, "at-1");
            Err(AuthError::Provider("revocation endpoint down".to_string()))
        });

        let auth = Authenticator::new(Arc::new(provider), settings());
        let session = auth
            .sessions()
            .create(ana(), grant("at-1", Some("rt-1"), Duration::hours(1)))
            .await;

        assert!(auth.logout(&cookie_headers(&session.id)).await);
        assert!(auth.sessions().get(&session.id).await.is_none());
        // A second logout has nothing to do.
        assert!(!auth.logout(&cookie_headers(&session.id)).await);
    }
}
