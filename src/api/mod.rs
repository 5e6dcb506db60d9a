//
//  optimizely-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Optimizely REST API v2 at
//! `api.optimizely.com`.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: the [`OptimizelyClient`]: construction, credential
//!   preparation, and the single dispatch path every resource method uses
//! - [`v2`]: per-resource types and operations (projects, experiments,
//!   audiences, campaigns, pages, events, attributes)
//! - [`common`]: shared types (errors, the response envelope, header
//!   metadata, id shorthand)
//!
//! ## Usage
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
//! let project = client.get_project(1523456u64).await?;
//! println!("{}", project.payload.name);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations resolve to the crate-wide [`Error`](crate::Error)
//! taxonomy. Failures that can be detected locally (missing credentials,
//! missing call arguments) are raised before any network I/O; upstream
//! failures carry the status code and the upstream error payload.

/// Core HTTP client wrapper for the Optimizely API.
///
/// Provides the [`OptimizelyClient`] struct which handles credential
/// preparation, request dispatch, and response envelope construction.
pub mod client;

/// Shared API types: errors, the response envelope, header metadata, and
/// the id-shorthand newtype.
pub mod common;

/// Resource implementations for API v2.
pub mod v2;

pub use client::OptimizelyClient;
