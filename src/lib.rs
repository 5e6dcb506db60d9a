//
//  optimizely-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Optimizely Client Library
//!
//! A Rust client for the Optimizely X REST API v2, covering project,
//! experiment, audience, campaign, page, event, and attribute management
//! with transparent OAuth2 token refresh.
//!
//! ## Overview
//!
//! The client wraps every API call in one uniform protocol: credentials are
//! prepared (refreshing the access token through the OAuth2 refresh-token
//! grant when it has expired), the request is dispatched with derived bearer
//! headers, and the response comes back as an envelope carrying the final
//! URL, status code, raw headers, parsed rate-limit/pagination metadata,
//! and the typed payload.
//!
//! ## Features
//!
//! - **Lazy token refresh**: expiry is checked on every call; an expired
//!   token is renewed exactly once even under concurrent calls
//! - **Typed resource surface**: serde models and per-resource methods for
//!   all seven resource types, plus experiment and campaign results
//! - **Id shorthand**: pass ids as strings or numbers interchangeably
//! - **Header metadata**: `x-ratelimit-*` counters and RFC5988 `link`
//!   pagination relations parsed into every response envelope
//! - **Typed errors**: configuration, validation, auth, API, and transport
//!   failures stay distinct so callers can build their own retry policy
//!
//! ## Module Structure
//!
//! - [`api`]: the HTTP client, dispatch path, shared types, and the v2
//!   resource implementations
//! - [`auth`]: the OAuth2 credential record and the credential manager
//!
//! ## Example Usage
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
//! // The first call refreshes the access token, then lists projects.
//! let projects = client.list_projects(&Default::default()).await?;
//! for project in &projects.payload {
//!     println!("{}: {}", project.id, project.name);
//! }
//!
//! // Rate-limit headers ride along on every response.
//! if let Some(remaining) = &projects.meta.rate_limit_remaining {
//!     println!("requests remaining: {remaining}");
//! }
//! # Ok(())
//! # }
//! ```

/// API client implementations for the Optimizely REST API v2.
///
/// The client handles authentication, request building, response metadata,
/// and error handling.
pub mod api;

/// Authentication and credential management.
///
/// Handles the OAuth2 credential record, the token-expiry invariant, and
/// the refresh-token exchange with single-flight coalescing.
pub mod auth;

/// Re-export of the main client type.
///
/// # Example
///
/// ```rust,no_run
/// use optimizely_client::{Credentials, OptimizelyClient};
///
/// let client = OptimizelyClient::new(Credentials::default())?;
/// # Ok::<(), optimizely_client::Error>(())
/// ```
pub use api::client::OptimizelyClient;

/// Re-exports of the shared API types.
pub use api::common::{parse_response_headers, ApiResponse, Error, ResourceId, ResponseMeta, Result};

/// Re-exports of the credential types.
pub use auth::{CredentialManager, Credentials};

/// Client name constant, used in the `User-Agent` header.
pub const APP_NAME: &str = "optimizely-client";

/// Client version constant, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
