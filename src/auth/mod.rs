//
//  optimizely-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credential handling for the Optimizely REST API: the OAuth2 credential
//! record and the manager that keeps its access token alive.
//!
//! ## Module Structure
//!
//! - [`credentials`]: the [`Credentials`] record (token state, expiry
//!   predicate, derived request headers)
//! - [`oauth`]: the [`CredentialManager`] and the refresh-token exchange
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
//!     access_token: Some("access-token".to_string()),
//!     ..Default::default()
//! };
//!
//! // No expiry window recorded, so this reads as expired and the manager
//! // will refresh it before the first request.
//! assert!(credentials.is_expired());
//! ```

mod credentials;
mod oauth;

pub use credentials::*;
pub use oauth::*;
