//
//  optimizely-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Optimizely API
//!
//! This module provides the core client for the Optimizely REST API v2.
//! It handles credential preparation, request dispatch, and response
//! envelope construction.
//!
//! ## Request Protocol
//!
//! Every resource method follows one protocol, implemented once here:
//!
//! 1. Ask the credential manager to prepare credentials (refreshing the
//!    access token first when needed).
//! 2. Apply the derived `Authorization`/`Content-Type` headers and build the
//!    final request URL (path parameters substituted, query serialized).
//! 3. Dispatch the request; transport failures are classified into
//!    [`Error::Timeout`] and [`Error::Network`].
//! 4. Parse rate-limit and pagination metadata from the response headers.
//! 5. Map non-2xx responses to [`Error::Api`] with the upstream message.
//! 6. Wrap 2xx responses in the [`ApiResponse`] envelope.
//!
//! ## Example
//!
//! ```rust,no_run
//! use optimizely_client::{Credentials, OptimizelyClient};
//!
//! # async fn example() -> optimizely_client::Result<()> {
//! let client = OptimizelyClient::new(Credentials {
//!     client_id: Some("client-id".to_string()),
//!     client_secret: Some("client-secret".to_string()),
//!     refresh_token: Some("refresh-token".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let projects = client
//!     .list_projects(&Default::default())
//!     .await?;
//! println!("{} projects", projects.payload.len());
//! # Ok(())
//! # }
//! ```

use once_cell::sync::Lazy;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::common::{parse_response_headers, ApiResponse, Error, Result};
use crate::auth::{CredentialManager, Credentials};

/// Base URL of the Optimizely REST API v2.
pub const BASE_URL: &str = "https://api.optimizely.com/v2/";

static API_ENDPOINT: Lazy<Url> = Lazy::new(|| Url::parse(BASE_URL).unwrap());

/// Parses an Optimizely API error response into [`Error::Api`].
///
/// Optimizely returns errors in the format:
/// ```json
/// {"message": "Human readable message", "code": 400, "uuid": "correlation-id"}
/// ```
///
/// The `message` becomes the error message; `code` and `uuid` are carried
/// along when present. If the body is not JSON or has no `message`, the raw
/// body is used as the message so nothing upstream is swallowed.
pub(crate) fn format_api_error(status: StatusCode, body: &str) -> Error {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            let code = json.get("code").map(|code| match code {
                serde_json::Value::String(code) => code.clone(),
                other => other.to_string(),
            });
            let uuid = json
                .get("uuid")
                .and_then(|uuid| uuid.as_str())
                .map(str::to_string);

            return Error::Api {
                status: status.as_u16(),
                message: message.to_string(),
                code,
                uuid,
            };
        }
    }

    Error::Api {
        status: status.as_u16(),
        message: body.to_string(),
        code: None,
        uuid: None,
    }
}

/// The main client for the Optimizely REST API v2.
///
/// The client owns a pooled `reqwest::Client`, the API base URL, and the
/// [`CredentialManager`] that keeps the access token alive. Resource methods
/// (`get_project`, `list_experiments`, ...) live in the [`crate::api::v2`]
/// modules and all funnel through the same dispatch path.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use optimizely_client::{Credentials, OptimizelyClient};
///
/// let client = OptimizelyClient::new(Credentials {
///     client_id: Some("client-id".to_string()),
///     client_secret: Some("client-secret".to_string()),
///     refresh_token: Some("refresh-token".to_string()),
///     ..Default::default()
/// })?;
/// # Ok::<(), optimizely_client::Error>(())
/// ```
///
/// # Notes
///
/// - The client is cheap to share behind an `Arc`; all methods take `&self`.
/// - Supply a pre-configured `reqwest::Client` (timeouts, proxies) with
///   [`with_http_client`](Self::with_http_client).
#[derive(Debug)]
pub struct OptimizelyClient {
    /// The underlying HTTP client, shared with the credential manager.
    pub(crate) http: Client,
    /// The API base URL, always with a trailing slash.
    pub(crate) base_url: Url,
    /// Credential state and refresh logic.
    credentials: CredentialManager,
}

impl OptimizelyClient {
    /// Creates a new client for the production Optimizely API.
    ///
    /// # Parameters
    ///
    /// * `credentials` - The OAuth2 credential record. A record with only an
    ///   `access_token` works until the token dies; a record with the full
    ///   refresh triple renews itself transparently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the HTTP client cannot be constructed.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            credentials: CredentialManager::new(credentials).with_http_client(http.clone()),
            http,
            base_url: API_ENDPOINT.clone(),
        })
    }

    /// Replaces the HTTP client used for all requests, including token
    /// exchanges.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.credentials = self.credentials.with_http_client(http.clone());
        self.http = http;
        self
    }

    /// Points the client at a different API base URL.
    ///
    /// A trailing slash is appended when missing so that relative paths
    /// resolve under the base rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` does not parse.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    /// Points the credential manager at a different token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` does not parse.
    pub fn with_token_url(mut self, url: &str) -> Result<Self> {
        self.credentials = self.credentials.with_token_url(url)?;
        Ok(self)
    }

    /// Returns the credential manager for direct token inspection or a
    /// forced refresh.
    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a relative resource path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Dispatches a prepared request and wraps the response in the envelope.
    ///
    /// This is the single implementation of the request protocol described
    /// in the module docs; every resource method delegates here. The expiry
    /// check (and any refresh it triggers) completes before request headers
    /// are built, so a request never goes out with a token known to be dead.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let credentials = self.credentials.prepare().await?;
        let request = credentials
            .apply_to_request(builder)
            .build()
            .map_err(Error::Network)?;
        let url = request.url().to_string();

        tracing::debug!(method = %request.method(), %url, "dispatching request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        let raw_headers = response.headers().clone();
        let meta = parse_response_headers(&raw_headers);
        let body = response.text().await.map_err(Error::from_transport)?;

        if !status.is_success() {
            return Err(format_api_error(status, &body));
        }

        // DELETE responses come back with an empty body; surface it as null.
        let payload = if body.is_empty() {
            serde_json::from_value(serde_json::Value::Null)?
        } else {
            serde_json::from_str(&body)?
        };

        Ok(ApiResponse {
            url,
            status_code: status.as_u16(),
            raw_headers,
            meta,
            payload,
        })
    }
}

fn parse_base_url(url: &str) -> Result<Url> {
    if url.ends_with('/') {
        Ok(Url::parse(url)?)
    } else {
        Ok(Url::parse(&format!("{url}/"))?)
    }
}
