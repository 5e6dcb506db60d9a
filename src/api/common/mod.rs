//
//  optimizely-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Optimizely Client
//!
//! Shared types used by every resource method: the error taxonomy, the
//! response envelope, the id-shorthand newtype, and response-header metadata
//! (re-exported from the [`meta`] submodule).
//!
//! # Overview
//!
//! - [`Error`] - unified error type for all API operations
//! - [`Result`] - crate-wide result alias
//! - [`ApiResponse`] - the `{url, status_code, raw_headers, meta, payload}`
//!   envelope returned by every resource method
//! - [`ResourceId`] - accepts a string or numeric id interchangeably
//! - [`ResponseMeta`] / [`parse_response_headers`] - header metadata
//!
//! # Example
//!
//! ```rust
//! use optimizely_client::{Error, ResourceId};
//!
//! fn describe(err: &Error) -> String {
//!     match err {
//!         Error::Validation(field) => format!("missing argument: {field}"),
//!         Error::Api { status, message, .. } => format!("{status}: {message}"),
//!         other => other.to_string(),
//!     }
//! }
//!
//! // Numeric and string ids coerce to the same representation.
//! assert_eq!(ResourceId::from(42u64), ResourceId::from("42"));
//! ```
//!
//! # Notes
//!
//! - All failures surface as `Err` values; nothing panics across the API
//!   boundary.
//! - No retries happen inside the crate. [`Error::Network`],
//!   [`Error::Timeout`], and [`Error::Cancelled`] stay distinct so callers
//!   can build their own retry policy on top.

use std::fmt;

use reqwest::header::HeaderMap;
use thiserror::Error as ThisError;

mod meta;

pub use meta::*;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all Optimizely API operations.
///
/// # Variants
///
/// | Variant | Raised when | Network call made |
/// |---------|-------------|-------------------|
/// | `Configuration` | A credential field needed for refresh is absent | no |
/// | `Validation` | A required call argument is absent | no |
/// | `UpstreamAuth` | The token exchange failed (wire or non-2xx) | yes |
/// | `Api` | A resource call answered non-2xx | yes |
/// | `Network` | Transport failure on a resource call | yes |
/// | `Timeout` | Transport timeout on a resource call | yes |
/// | `Cancelled` | The caller aborted the request | - |
/// | `InvalidUrl` | A builder was given an unparseable URL | no |
/// | `Decode` | A 2xx body did not deserialize | yes |
///
/// # Example
///
/// ```rust
/// use optimizely_client::Error;
///
/// let err = Error::Configuration("client secret");
/// assert_eq!(err.to_string(), "client secret not set");
/// ```
#[derive(ThisError, Debug)]
pub enum Error {
    /// A credential field required for the token refresh is not set.
    ///
    /// Carries the human-readable field name (`"client ID"`,
    /// `"client secret"`, or `"refresh token"`).
    #[error("{0} not set")]
    Configuration(&'static str),

    /// A required call argument is missing or empty.
    ///
    /// Raised before any network I/O, carrying the name of the missing
    /// field (`"id"`, `"project_id"`, ...).
    #[error("required: {0}")]
    Validation(&'static str),

    /// The refresh-token exchange failed.
    ///
    /// `status` is `None` for transport-level failures and carries the HTTP
    /// status for non-2xx responses; `message` holds the response body or
    /// the transport error text.
    #[error("token refresh failed: {message}")]
    UpstreamAuth {
        /// HTTP status of the rejected exchange, when one was received.
        status: Option<u16>,
        /// Response body or transport error description.
        message: String,
        /// The underlying transport error, when there was one.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A resource call returned a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// The upstream HTTP status code.
        status: u16,
        /// The upstream error message (falls back to the raw body).
        message: String,
        /// The upstream error code, if one was provided.
        code: Option<String>,
        /// The upstream correlation id, if one was provided.
        uuid: Option<String>,
    },

    /// A network-level failure (connection refused, DNS, TLS, ...).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request hit a configured timeout.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The request was aborted by the caller before completion.
    #[error("request cancelled")]
    Cancelled,

    /// A base or token URL handed to a builder did not parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A successful response carried a body that did not deserialize.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Classifies a transport error, keeping timeouts distinct so callers
    /// can apply their own retry policy.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else {
            Error::Network(err)
        }
    }
}

/// The response envelope returned by every resource method.
///
/// Wraps the deserialized payload together with the request URL that was
/// actually dispatched, the upstream status code, the raw response headers,
/// and the parsed [`ResponseMeta`].
///
/// # Type Parameters
///
/// - `T` - the payload type: a resource model, a `Vec` of models for list
///   endpoints, or `serde_json::Value` for DELETE and results payloads
///
/// # Example
///
/// ```rust,no_run
/// use optimizely_client::{Credentials, OptimizelyClient};
///
/// # async fn example() -> optimizely_client::Result<()> {
/// let client = OptimizelyClient::new(Credentials {
///     access_token: Some("token".to_string()),
///     ..Default::default()
/// })?;
///
/// let response = client.get_project(1234u64).await?;
/// println!("GET {} -> {}", response.url, response.status_code);
/// if let Some(remaining) = &response.meta.rate_limit_remaining {
///     println!("rate limit remaining: {remaining}");
/// }
/// println!("project name: {}", response.payload.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The fully-resolved URL the request was dispatched to.
    pub url: String,

    /// The upstream HTTP status code.
    pub status_code: u16,

    /// The raw response headers, untouched.
    pub raw_headers: HeaderMap,

    /// Rate-limit and pagination metadata parsed from the headers.
    pub meta: ResponseMeta,

    /// The deserialized response body.
    pub payload: T,
}

/// A resource identifier accepted as either a string or a number.
///
/// Resource methods take `impl Into<ResourceId>`, so call sites can pass
/// `"15"`, `String::from("15")`, or `15u64` interchangeably. The value is
/// normalized to its string form immediately; a numeric zero becomes `"0"`
/// and is a perfectly valid id. Only an *empty* id counts as missing and
/// fails validation before any network call.
///
/// # Example
///
/// ```rust
/// use optimizely_client::ResourceId;
///
/// assert_eq!(ResourceId::from("abc").as_str(), "abc");
/// assert_eq!(ResourceId::from(0u64).as_str(), "0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, failing with [`Error::Validation`] when it is empty.
    pub(crate) fn require(self, field: &'static str) -> Result<String> {
        if self.0.is_empty() {
            Err(Error::Validation(field))
        } else {
            Ok(self.0)
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}
