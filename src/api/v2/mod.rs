//
//  optimizely-client
//  api/v2/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Optimizely REST API v2 resource implementations.
//!
//! This module provides type-safe bindings for the Optimizely REST API v2,
//! organized by resource type. Each submodule defines the resource's serde
//! models, its list filter and write payloads, and the operations themselves
//! as methods on [`OptimizelyClient`](crate::OptimizelyClient).
//!
//! # Module Organization
//!
//! - [`projects`] - Project management (the top-level container)
//! - [`experiments`] - Experiment CRUD, lifecycle actions, and results
//! - [`audiences`] - Audience targeting definitions
//! - [`campaigns`] - Campaign CRUD and results
//! - [`pages`] - Page activation targets
//! - [`events`] - In-page and custom events (nested routes)
//! - [`attributes`] - Visitor attribute definitions
//!
//! # Conventions
//!
//! - Single-resource methods accept ids as strings or numbers via
//!   [`ResourceId`](crate::ResourceId).
//! - Project-scoped list filters convert from a bare project id.
//! - Required identifying fields are validated before any network call.
//! - Every method resolves to the same
//!   [`ApiResponse`](crate::ApiResponse) envelope.
//!
//! # Example
//!
//! ```rust,no_run
//! use optimizely_client::{Credentials, OptimizelyClient};
//!
//! # async fn example() -> optimizely_client::Result<()> {
//! # let client = OptimizelyClient::new(Credentials::default())?;
//! // List the experiments of project 9000, first page.
//! let experiments = client.list_experiments(9000u64).await?;
//!
//! for experiment in &experiments.payload {
//!     println!("{}: {:?}", experiment.id, experiment.name);
//! }
//! # Ok(())
//! # }
//! ```

use crate::api::common::{Error, Result};

pub mod attributes;
pub mod audiences;
pub mod campaigns;
pub mod events;
pub mod experiments;
pub mod pages;
pub mod projects;

pub use attributes::*;
pub use audiences::*;
pub use campaigns::*;
pub use events::*;
pub use experiments::*;
pub use pages::*;
pub use projects::*;

/// Validates a required string field, treating empty as absent.
///
/// An explicitly-provided `"0"` passes; only `None` and `""` fail.
pub(crate) fn require_field(value: Option<&str>, field: &'static str) -> Result<()> {
    match value {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(Error::Validation(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field_accepts_falsy_but_present_values() {
        assert!(require_field(Some("0"), "project_id").is_ok());
        assert!(require_field(Some("abc"), "project_id").is_ok());
    }

    #[test]
    fn test_require_field_rejects_absent_and_empty() {
        assert!(matches!(
            require_field(None, "project_id").unwrap_err(),
            Error::Validation("project_id")
        ));
        assert!(matches!(
            require_field(Some(""), "project_id").unwrap_err(),
            Error::Validation("project_id")
        ));
    }
}
