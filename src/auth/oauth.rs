//
//  optimizely-client
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Token Refresh
//!
//! This module implements the refresh-token grant against Optimizely's token
//! endpoint and the [`CredentialManager`] that decides when to use it.
//!
//! ## Refresh Flow
//!
//! 1. A resource call asks the manager to [`prepare`](CredentialManager::prepare)
//!    credentials for the next request.
//! 2. The manager checks the expiry invariant on the shared [`Credentials`]
//!    record. A valid token is returned as-is.
//! 3. An expired token with a configured refresh token triggers a single
//!    `POST` to the token endpoint with `grant_type=refresh_token`.
//! 4. On success the access token, token type, expiry window, and issue
//!    timestamp are updated together; on failure the record is left exactly
//!    as it was.
//!
//! The refresh is checked lazily on every call rather than by a background
//! timer, so a client can sit idle for any length of time and still come back
//! with a working token on its next request.
//!
//! ## Concurrency
//!
//! The credentials live behind an async mutex that is held across the
//! exchange. Concurrent `prepare()` calls that race on an expired token
//! therefore coalesce into one in-flight exchange: the second caller blocks
//! on the lock and, by the time it acquires it, finds a fresh token and
//! returns without a second round-trip.
//!
//! ## Example
//!
//! ```rust,no_run
//! use optimizely_client::{CredentialManager, Credentials};
//!
//! # async fn example() -> optimizely_client::Result<()> {
//! let manager = CredentialManager::new(Credentials {
//!     client_id: Some("client-id".to_string()),
//!     client_secret: Some("client-secret".to_string()),
//!     refresh_token: Some("refresh-token".to_string()),
//!     ..Default::default()
//! });
//!
//! // Refreshes on first use because no access token is present yet.
//! let credentials = manager.prepare().await?;
//! assert!(credentials.access_token.is_some());
//! # Ok(())
//! # }
//! ```

use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use url::Url;

use crate::api::common::{Error, Result};

use super::credentials::Credentials;

/// Optimizely OAuth token endpoint.
pub const TOKEN_URL: &str = "https://app.optimizely.com/oauth2/token";

static TOKEN_ENDPOINT: Lazy<Url> = Lazy::new(|| Url::parse(TOKEN_URL).unwrap());

/// Internal struct for deserializing token-endpoint responses.
#[derive(Deserialize)]
struct TokenResponseRaw {
    access_token: String,
    token_type: String,
    expires_in: Option<u64>,
}

/// Owns the shared [`Credentials`] record and keeps its access token alive.
///
/// The manager is the only code that mutates credentials. Callers interact
/// with it through three operations:
///
/// - [`prepare`](Self::prepare): refresh-if-expired, the entry point used by
///   every resource method.
/// - [`refresh`](Self::refresh): unconditional token exchange.
/// - [`current`](Self::current): snapshot of the record without any I/O.
///
/// # Example
///
/// ```rust,no_run
/// use optimizely_client::{CredentialManager, Credentials};
///
/// # async fn example() -> optimizely_client::Result<()> {
/// let manager = CredentialManager::new(Credentials {
///     client_id: Some("client-id".to_string()),
///     client_secret: Some("client-secret".to_string()),
///     refresh_token: Some("refresh-token".to_string()),
///     ..Default::default()
/// });
///
/// let credentials = manager.prepare().await?;
/// println!("token type: {:?}", credentials.token_type);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CredentialManager {
    /// HTTP client used for the token exchange.
    http: Client,
    /// The token endpoint; overridable for self-hosted gateways and tests.
    token_url: Url,
    /// The shared credential record. The mutex is held across the exchange
    /// so concurrent refreshes coalesce into one.
    credentials: Mutex<Credentials>,
}

impl CredentialManager {
    /// Creates a manager around an initial credential record.
    ///
    /// The manager starts with its own HTTP client and the production token
    /// endpoint; both can be replaced with the `with_*` builders.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            token_url: TOKEN_ENDPOINT.clone(),
            credentials: Mutex::new(credentials),
        }
    }

    /// Replaces the HTTP client used for token exchanges.
    ///
    /// The API client shares its pooled `reqwest::Client` with the manager
    /// through this method.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` does not parse.
    pub fn with_token_url(mut self, url: &str) -> Result<Self> {
        self.token_url = Url::parse(url)?;
        Ok(self)
    }

    /// Returns a snapshot of the current credentials without refreshing.
    pub async fn current(&self) -> Credentials {
        self.credentials.lock().await.clone()
    }

    /// Returns credentials guaranteed usable for the next request.
    ///
    /// If a refresh token is configured and the access token is expired, the
    /// refresh exchange runs before this returns; otherwise the current
    /// record is returned immediately. Without a refresh token the record is
    /// returned unchanged even when it reads as expired.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Configuration`] for a missing client id/secret or
    /// refresh token and [`Error::UpstreamAuth`] for a failed exchange. No
    /// retry is attempted.
    pub async fn prepare(&self) -> Result<Credentials> {
        let mut credentials = self.credentials.lock().await;

        if credentials.can_refresh() && credentials.is_expired() {
            self.exchange(&mut credentials).await?;
        }

        Ok(credentials.clone())
    }

    /// Performs the refresh-token exchange unconditionally.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] when `client_id`, `client_secret`, or
    ///   `refresh_token` is absent (checked in that order, before any
    ///   network call).
    /// - [`Error::UpstreamAuth`] when the exchange fails on the wire or the
    ///   endpoint answers non-2xx. The credential record is left unchanged.
    pub async fn refresh(&self) -> Result<Credentials> {
        let mut credentials = self.credentials.lock().await;
        self.exchange(&mut credentials).await?;
        Ok(credentials.clone())
    }

    /// Exchanges the refresh token for a new access token and commits the
    /// result into the locked record.
    async fn exchange(&self, credentials: &mut Credentials) -> Result<()> {
        let client_id = credentials
            .client_id
            .clone()
            .ok_or(Error::Configuration("client ID"))?;
        let client_secret = credentials
            .client_secret
            .clone()
            .ok_or(Error::Configuration("client secret"))?;
        let refresh_token = credentials
            .refresh_token
            .clone()
            .ok_or(Error::Configuration("refresh token"))?;

        tracing::debug!(endpoint = %self.token_url, "refreshing access token");

        let response = self
            .http
            .post(self.token_url.clone())
            .query(&[
                ("refresh_token", refresh_token.as_str()),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|err| Error::UpstreamAuth {
                status: None,
                message: err.to_string(),
                source: Some(err),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "token refresh rejected");
            return Err(Error::UpstreamAuth {
                status: Some(status.as_u16()),
                message: body,
                source: None,
            });
        }

        let token: TokenResponseRaw = response.json().await.map_err(|err| Error::UpstreamAuth {
            status: Some(status.as_u16()),
            message: err.to_string(),
            source: Some(err),
        })?;

        // Issue time is captured after the response, not before the call.
        let timestamp = Utc::now().timestamp();

        credentials.access_token = Some(token.access_token);
        credentials.token_type = Some(token.token_type);
        credentials.expires_in = token.expires_in;
        credentials.access_token_timestamp = Some(timestamp);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use reqwest::header::AUTHORIZATION;

    fn refreshable_credentials() -> Credentials {
        Credentials {
            client_id: Some("client-id".to_string()),
            client_secret: Some("client-secret".to_string()),
            refresh_token: Some("refresh-token".to_string()),
            ..Default::default()
        }
    }

    fn expired_credentials() -> Credentials {
        Credentials {
            access_token: Some("stale-token".to_string()),
            expires_in: Some(10),
            access_token_timestamp: Some(Utc::now().timestamp() - 100),
            ..refreshable_credentials()
        }
    }

    fn manager_for(server: &ServerGuard, credentials: Credentials) -> CredentialManager {
        CredentialManager::new(credentials)
            .with_token_url(&format!("{}/oauth2/token", server.url()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_prepare_refreshes_expired_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth2/token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("refresh_token".into(), "refresh-token".into()),
                Matcher::UrlEncoded("client_id".into(), "client-id".into()),
                Matcher::UrlEncoded("client_secret".into(), "client-secret".into()),
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"fresh-token","token_type":"bearer","expires_in":7200}"#)
            .create_async()
            .await;

        let before = Utc::now().timestamp();
        let manager = manager_for(&server, expired_credentials());
        let credentials = manager.prepare().await.unwrap();

        assert_eq!(credentials.access_token.as_deref(), Some("fresh-token"));
        assert_eq!(credentials.token_type.as_deref(), Some("bearer"));
        assert_eq!(credentials.expires_in, Some(7200));
        assert!(credentials.access_token_timestamp.unwrap() >= before);
        assert!(!credentials.is_expired());

        // Derived headers pick up the new token immediately.
        let headers = credentials.headers();
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer fresh-token"
        );

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_prepare_skips_refresh_for_valid_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth2/token")
            .expect(0)
            .create_async()
            .await;

        let valid = Credentials {
            access_token: Some("live-token".to_string()),
            expires_in: Some(7200),
            access_token_timestamp: Some(Utc::now().timestamp() - 60),
            ..refreshable_credentials()
        };

        let manager = manager_for(&server, valid.clone());
        let credentials = manager.prepare().await.unwrap();

        assert_eq!(credentials, valid);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_prepare_without_refresh_token_returns_unchanged() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth2/token")
            .expect(0)
            .create_async()
            .await;

        // Only an access token: technically expired, but there is nothing to
        // refresh with, so the record must come back untouched.
        let bare = Credentials {
            access_token: Some("only-token".to_string()),
            ..Default::default()
        };

        let manager = manager_for(&server, bare.clone());
        let credentials = manager.prepare().await.unwrap();

        assert_eq!(credentials, bare);
        assert!(credentials.is_expired());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_concurrent_prepare_refreshes_once() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth2/token")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"fresh-token","token_type":"bearer","expires_in":7200}"#)
            .expect(1)
            .create_async()
            .await;

        let manager = manager_for(&server, expired_credentials());

        let (first, second, third) =
            tokio::join!(manager.prepare(), manager.prepare(), manager.prepare());

        assert_eq!(first.unwrap().access_token.as_deref(), Some("fresh-token"));
        assert_eq!(second.unwrap().access_token.as_deref(), Some("fresh-token"));
        assert_eq!(third.unwrap().access_token.as_deref(), Some("fresh-token"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_missing_client_id_checked_first() {
        let manager = CredentialManager::new(Credentials {
            refresh_token: Some("refresh-token".to_string()),
            ..Default::default()
        });

        let err = manager.refresh().await.unwrap_err();
        assert!(matches!(err, Error::Configuration("client ID")));
    }

    #[tokio::test]
    async fn test_refresh_missing_client_secret_makes_no_network_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth2/token")
            .expect(0)
            .create_async()
            .await;

        let manager = manager_for(
            &server,
            Credentials {
                client_id: Some("client-id".to_string()),
                refresh_token: Some("refresh-token".to_string()),
                ..Default::default()
            },
        );

        let err = manager.refresh().await.unwrap_err();
        assert!(matches!(err, Error::Configuration("client secret")));
        assert!(err.to_string().contains("client secret"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_credentials_unchanged() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth2/token")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create_async()
            .await;

        let manager = manager_for(&server, expired_credentials());
        let before = manager.current().await;

        let err = manager.refresh().await.unwrap_err();
        match err {
            Error::UpstreamAuth { status, message, .. } => {
                assert_eq!(status, Some(401));
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("expected UpstreamAuth, got {other:?}"),
        }

        assert_eq!(manager.current().await, before);
    }
}
