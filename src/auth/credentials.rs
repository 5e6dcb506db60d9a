//
//  optimizely-client
//  auth/credentials.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth2 Credential Record
//!
//! This module defines the [`Credentials`] record shared by the client and the
//! credential manager: the OAuth2 client id/secret pair, the long-lived
//! refresh token, and the short-lived access token together with its validity
//! window.
//!
//! ## Token Validity
//!
//! An access token is considered valid only when all three of the following
//! hold:
//!
//! 1. `access_token` is present
//! 2. `expires_in` and `access_token_timestamp` are both present
//! 3. `access_token_timestamp + expires_in` has not passed
//!
//! Any missing field counts as expired, so an incompletely-populated record
//! always falls through to a refresh rather than sending a dead token.
//!
//! ## Example
//!
//! ```rust
//! use optimizely_client::Credentials;
//!
//! let credentials = Credentials {
//!     client_id: Some("client-id".to_string()),
//!     client_secret: Some("client-secret".to_string()),
//!     refresh_token: Some("refresh-token".to_string()),
//!     ..Default::default()
//! };
//!
//! // No access token yet, so the record reads as expired.
//! assert!(credentials.is_expired());
//! assert!(credentials.can_refresh());
//! ```

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;

/// OAuth2 credentials for the Optimizely REST API.
///
/// All fields are optional so that partially-configured records can be
/// expressed directly: a client constructed with only an `access_token` can
/// make requests until the token dies, while a record carrying the full
/// `client_id`/`client_secret`/`refresh_token` triple renews itself through
/// the credential manager.
///
/// # Fields
///
/// | Field | Role |
/// |-------|------|
/// | `client_id` | OAuth2 client identifier, required for refresh |
/// | `client_secret` | OAuth2 client secret, required for refresh |
/// | `refresh_token` | Long-lived token exchanged for new access tokens |
/// | `access_token` | Bearer token sent with every API request |
/// | `token_type` | Token type reported by the token endpoint (informational) |
/// | `expires_in` | Validity window of the access token, in seconds |
/// | `access_token_timestamp` | Unix time the access token was (re)issued |
///
/// # Example
///
/// ```rust
/// use optimizely_client::Credentials;
///
/// let credentials = Credentials {
///     access_token: Some("existing-token".to_string()),
///     ..Default::default()
/// };
/// ```
///
/// # Notes
///
/// - The record is only ever mutated by the credential manager's refresh
///   path; everything handed to callers is a snapshot.
/// - `token_type` and `expires_in` are set from the token-endpoint response
///   and should not normally be filled in by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// The OAuth2 client identifier issued for the application.
    pub client_id: Option<String>,

    /// The OAuth2 client secret paired with `client_id`.
    pub client_secret: Option<String>,

    /// The long-lived refresh token. Without it the access token is never
    /// renewed automatically.
    pub refresh_token: Option<String>,

    /// The bearer token used to authenticate API requests.
    pub access_token: Option<String>,

    /// The token type reported by the token endpoint, typically `"bearer"`.
    pub token_type: Option<String>,

    /// Lifetime of the access token in seconds, as reported by the token
    /// endpoint.
    pub expires_in: Option<u64>,

    /// Unix timestamp (seconds) at which the access token was obtained or
    /// last refreshed.
    pub access_token_timestamp: Option<i64>,
}

impl Credentials {
    /// Checks whether the access token should be treated as expired.
    ///
    /// Implements the validity invariant described in the module docs. The
    /// predicate is pure apart from reading the current wall-clock time and
    /// never fails: a record with missing fields simply reads as expired.
    ///
    /// # Returns
    ///
    /// `true` if the token is missing, has no recorded validity window, or
    /// the window has elapsed; `false` while the token is still usable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use optimizely_client::Credentials;
    ///
    /// let fresh = Credentials {
    ///     access_token: Some("token".to_string()),
    ///     expires_in: Some(7200),
    ///     access_token_timestamp: Some(Utc::now().timestamp()),
    ///     ..Default::default()
    /// };
    /// assert!(!fresh.is_expired());
    /// ```
    pub fn is_expired(&self) -> bool {
        if self.access_token.is_none() {
            return true;
        }

        let (Some(expires_in), Some(timestamp)) = (self.expires_in, self.access_token_timestamp)
        else {
            return true;
        };

        timestamp + (expires_in as i64) < Utc::now().timestamp()
    }

    /// Checks whether this record carries a refresh token.
    ///
    /// When this returns `false` the credential manager skips the refresh
    /// exchange entirely, even for an expired access token.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Builds the request headers derived from this record.
    ///
    /// Produces `Content-Type: application/json` plus, when an access token
    /// is present, `Authorization: Bearer <token>`. The map is recomputed on
    /// every call so a refreshed token is always reflected; nothing is cached
    /// between requests.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.access_token {
            if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        headers
    }

    /// Applies the derived headers to an outgoing request.
    ///
    /// # Parameters
    ///
    /// * `request` - The request builder to decorate
    ///
    /// # Returns
    ///
    /// The builder with authorization and content-type headers set.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.headers(self.headers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> i64 {
        Utc::now().timestamp()
    }

    #[test]
    fn test_missing_access_token_is_expired() {
        let credentials = Credentials {
            expires_in: Some(7200),
            access_token_timestamp: Some(now()),
            ..Default::default()
        };
        assert!(credentials.is_expired());
    }

    #[test]
    fn test_missing_expiry_fields_is_expired() {
        let missing_window = Credentials {
            access_token: Some("token".to_string()),
            access_token_timestamp: Some(now()),
            ..Default::default()
        };
        assert!(missing_window.is_expired());

        let missing_timestamp = Credentials {
            access_token: Some("token".to_string()),
            expires_in: Some(7200),
            ..Default::default()
        };
        assert!(missing_timestamp.is_expired());
    }

    #[test]
    fn test_token_within_window_is_not_expired() {
        let credentials = Credentials {
            access_token: Some("token".to_string()),
            expires_in: Some(7200),
            access_token_timestamp: Some(now() - 60),
            ..Default::default()
        };
        assert!(!credentials.is_expired());
    }

    #[test]
    fn test_token_past_window_is_expired() {
        let credentials = Credentials {
            access_token: Some("token".to_string()),
            expires_in: Some(60),
            access_token_timestamp: Some(now() - 120),
            ..Default::default()
        };
        assert!(credentials.is_expired());
    }

    #[test]
    fn test_can_refresh_requires_refresh_token() {
        assert!(!Credentials::default().can_refresh());

        let credentials = Credentials {
            refresh_token: Some("refresh".to_string()),
            ..Default::default()
        };
        assert!(credentials.can_refresh());
    }

    #[test]
    fn test_headers_carry_bearer_token() {
        let credentials = Credentials {
            access_token: Some("token-123".to_string()),
            ..Default::default()
        };

        let headers = credentials.headers();
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap().to_str().unwrap(),
            "application/json"
        );
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer token-123"
        );
    }

    #[test]
    fn test_headers_without_token_omit_authorization() {
        let headers = Credentials::default().headers();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(CONTENT_TYPE).is_some());
    }
}
