//
//  optimizely-client
//  api/v2/events.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Event resource types and operations.
//!
//! Events record visitor actions that metrics are built on. They come in two
//! flavors with different routes:
//!
//! - **In-page events** live under a page:
//!   `pages/{page_id}/events[/{event_id}]`
//! - **Custom events** live under a project:
//!   `projects/{project_id}/custom_events[/{event_id}]`
//!
//! Reads (`list_events`, `get_event`) cover both flavors through the flat
//! `events` routes; writes go through the nested routes above, so every
//! write takes the parent id alongside the event payload. Both path
//! parameters are validated before any network call.
//!
//! # Example
//!
//! ```rust,no_run
//! use optimizely_client::api::v2::EventData;
//! use optimizely_client::{Credentials, OptimizelyClient};
//!
//! # async fn example() -> optimizely_client::Result<()> {
//! # let client = OptimizelyClient::new(Credentials::default())?;
//! let created = client
//!     .create_in_page_event(
//!         12345u64,
//!         &EventData {
//!             name: Some("Add to cart".to_string()),
//!             event_type: Some("click".to_string()),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//!
//! println!("event id {}", created.payload.id);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::api::client::OptimizelyClient;
use crate::api::common::{ApiResponse, ResourceId, Result};

use super::require_field;

/// Represents an Optimizely event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for the event.
    pub id: i64,

    /// The project this event belongs to.
    #[serde(default)]
    pub project_id: Option<i64>,

    /// The page this event is attached to, for in-page events.
    #[serde(default)]
    pub page_id: Option<i64>,

    /// Human-readable name of the event.
    #[serde(default)]
    pub name: Option<String>,

    /// Unique key used to reference the event from code.
    #[serde(default)]
    pub key: Option<String>,

    /// Event category shown in the Optimizely UI.
    #[serde(default)]
    pub category: Option<String>,

    /// Event type: `click`, `custom`, `pageview`, ...
    #[serde(default)]
    pub event_type: Option<String>,

    /// Optional description of what the event tracks.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the event has been archived.
    #[serde(default)]
    pub archived: Option<bool>,

    /// ISO 8601 timestamp indicating when the event was created.
    #[serde(default)]
    pub created: Option<String>,
}

/// Query filter for [`list_events`](OptimizelyClient::list_events).
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventFilter {
    /// The project to list events for. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Include classic (pre-X) events in the listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_classic: Option<bool>,

    /// Page number to fetch (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of events per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl From<&str> for EventFilter {
    fn from(project_id: &str) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for EventFilter {
    fn from(project_id: String) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

impl From<u64> for EventFilter {
    fn from(project_id: u64) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

/// Write payload for event create and update calls, both flavors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventData {
    /// Human-readable name of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Unique key used to reference the event from code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Event category shown in the Optimizely UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Event type: `click`, `custom`, `pageview`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// CSS selector, for click events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Optional description of what the event tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the event is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl OptimizelyClient {
    /// Retrieves the events in a project, both in-page and custom.
    ///
    /// Accepts either a full [`EventFilter`] or a bare project id.
    pub async fn list_events(
        &self,
        filter: impl Into<EventFilter>,
    ) -> Result<ApiResponse<Vec<Event>>> {
        let filter = filter.into();
        require_field(filter.project_id.as_deref(), "project_id")?;
        let url = self.endpoint("events")?;
        self.execute(self.http.get(url).query(&filter)).await
    }

    /// Retrieves a single event by id.
    pub async fn get_event(&self, id: impl Into<ResourceId>) -> Result<ApiResponse<Event>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("events/{id}"))?;
        self.execute(self.http.get(url)).await
    }

    /// Creates an in-page event under a page.
    pub async fn create_in_page_event(
        &self,
        page_id: impl Into<ResourceId>,
        event: &EventData,
    ) -> Result<ApiResponse<Event>> {
        let page_id = page_id.into().require("page_id")?;
        let url = self.endpoint(&format!("pages/{page_id}/events"))?;
        self.execute(self.http.post(url).json(event)).await
    }

    /// Creates a custom event under a project.
    pub async fn create_custom_event(
        &self,
        project_id: impl Into<ResourceId>,
        event: &EventData,
    ) -> Result<ApiResponse<Event>> {
        let project_id = project_id.into().require("project_id")?;
        let url = self.endpoint(&format!("projects/{project_id}/custom_events"))?;
        self.execute(self.http.post(url).json(event)).await
    }

    /// Updates an in-page event.
    pub async fn update_in_page_event(
        &self,
        page_id: impl Into<ResourceId>,
        event_id: impl Into<ResourceId>,
        event: &EventData,
    ) -> Result<ApiResponse<Event>> {
        let page_id = page_id.into().require("page_id")?;
        let event_id = event_id.into().require("event_id")?;
        let url = self.endpoint(&format!("pages/{page_id}/events/{event_id}"))?;
        self.execute(self.http.put(url).json(event)).await
    }

    /// Updates a custom event.
    pub async fn update_custom_event(
        &self,
        project_id: impl Into<ResourceId>,
        event_id: impl Into<ResourceId>,
        event: &EventData,
    ) -> Result<ApiResponse<Event>> {
        let project_id = project_id.into().require("project_id")?;
        let event_id = event_id.into().require("event_id")?;
        let url = self.endpoint(&format!("projects/{project_id}/custom_events/{event_id}"))?;
        self.execute(self.http.put(url).json(event)).await
    }

    /// Deletes an in-page event.
    pub async fn delete_in_page_event(
        &self,
        page_id: impl Into<ResourceId>,
        event_id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let page_id = page_id.into().require("page_id")?;
        let event_id = event_id.into().require("event_id")?;
        let url = self.endpoint(&format!("pages/{page_id}/events/{event_id}"))?;
        self.execute(self.http.delete(url)).await
    }

    /// Deletes a custom event.
    pub async fn delete_custom_event(
        &self,
        project_id: impl Into<ResourceId>,
        event_id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let project_id = project_id.into().require("project_id")?;
        let event_id = event_id.into().require("event_id")?;
        let url = self.endpoint(&format!("projects/{project_id}/custom_events/{event_id}"))?;
        self.execute(self.http.delete(url)).await
    }
}
