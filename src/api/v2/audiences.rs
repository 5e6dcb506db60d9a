//
//  optimizely-client
//  api/v2/audiences.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Audience resource types and operations.
//!
//! Audiences define which visitors are eligible for an experiment, as a
//! tree of targeting conditions. The API has no audience delete; archive an
//! audience by updating `archived` instead.

use serde::{Deserialize, Serialize};

use crate::api::client::OptimizelyClient;
use crate::api::common::{ApiResponse, Error, ResourceId, Result};

use super::require_field;

/// Represents an Optimizely audience.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audience {
    /// Unique identifier for the audience.
    pub id: i64,

    /// The project this audience belongs to.
    #[serde(default)]
    pub project_id: Option<i64>,

    /// Human-readable name of the audience.
    #[serde(default)]
    pub name: Option<String>,

    /// Optional description shown in the Optimizely UI.
    #[serde(default)]
    pub description: Option<String>,

    /// Targeting condition tree, in the API's JSON condition syntax.
    #[serde(default)]
    pub conditions: Option<serde_json::Value>,

    /// Whether the audience is available for segmentation in results.
    #[serde(default)]
    pub segmentation: Option<bool>,

    /// Whether the audience has been archived.
    #[serde(default)]
    pub archived: Option<bool>,

    /// ISO 8601 timestamp indicating when the audience was created.
    #[serde(default)]
    pub created: Option<String>,

    /// ISO 8601 timestamp indicating when the audience was last modified.
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// Query filter for [`list_audiences`](OptimizelyClient::list_audiences).
///
/// A bare project id converts into a filter, like the other list filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudienceFilter {
    /// The project to list audiences for. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Page number to fetch (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of audiences per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl From<&str> for AudienceFilter {
    fn from(project_id: &str) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for AudienceFilter {
    fn from(project_id: String) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

impl From<u64> for AudienceFilter {
    fn from(project_id: u64) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

/// Write payload for audience create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudienceData {
    /// The project the audience belongs to. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    /// Human-readable name of the audience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description shown in the Optimizely UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Targeting condition tree, in the API's JSON condition syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,

    /// Whether the audience is available for segmentation in results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segmentation: Option<bool>,

    /// Whether the audience is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl OptimizelyClient {
    /// Retrieves the audiences in a project.
    ///
    /// Accepts either a full [`AudienceFilter`] or a bare project id.
    pub async fn list_audiences(
        &self,
        filter: impl Into<AudienceFilter>,
    ) -> Result<ApiResponse<Vec<Audience>>> {
        let filter = filter.into();
        require_field(filter.project_id.as_deref(), "project_id")?;
        let url = self.endpoint("audiences")?;
        self.execute(self.http.get(url).query(&filter)).await
    }

    /// Retrieves a single audience by id.
    pub async fn get_audience(&self, id: impl Into<ResourceId>) -> Result<ApiResponse<Audience>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("audiences/{id}"))?;
        self.execute(self.http.get(url)).await
    }

    /// Creates an audience.
    ///
    /// Validates that `audience.project_id` is present before dispatching;
    /// the API refuses a create without one.
    pub async fn create_audience(&self, audience: &AudienceData) -> Result<ApiResponse<Audience>> {
        if audience.project_id.is_none() {
            return Err(Error::Validation("project_id"));
        }
        let url = self.endpoint("audiences")?;
        self.execute(self.http.post(url).json(audience)).await
    }

    /// Updates an existing audience.
    pub async fn update_audience(
        &self,
        id: impl Into<ResourceId>,
        audience: &AudienceData,
    ) -> Result<ApiResponse<Audience>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("audiences/{id}"))?;
        self.execute(self.http.put(url).json(audience)).await
    }
}
