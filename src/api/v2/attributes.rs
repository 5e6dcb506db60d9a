//
//  optimizely-client
//  api/v2/attributes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Attribute resource types and operations.
//!
//! Attributes describe visitor properties (plan type, logged-in state, ...)
//! that audiences target and results segment on.

use serde::{Deserialize, Serialize};

use crate::api::client::OptimizelyClient;
use crate::api::common::{ApiResponse, ResourceId, Result};

use super::require_field;

/// Represents an Optimizely attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Unique identifier for the attribute.
    pub id: i64,

    /// The project this attribute belongs to.
    #[serde(default)]
    pub project_id: Option<i64>,

    /// Unique key used to reference the attribute from code.
    #[serde(default)]
    pub key: Option<String>,

    /// Human-readable name of the attribute.
    #[serde(default)]
    pub name: Option<String>,

    /// Optional description of what the attribute captures.
    #[serde(default)]
    pub description: Option<String>,

    /// Source of the attribute's values (`custom_attribute`, ...).
    #[serde(default)]
    pub condition_type: Option<String>,

    /// Whether the attribute has been archived.
    #[serde(default)]
    pub archived: Option<bool>,

    /// ISO 8601 timestamp indicating when the attribute was last modified.
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// Query filter for [`list_attributes`](OptimizelyClient::list_attributes).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttributeFilter {
    /// The project to list attributes for. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Page number to fetch (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of attributes per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl From<&str> for AttributeFilter {
    fn from(project_id: &str) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for AttributeFilter {
    fn from(project_id: String) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

impl From<u64> for AttributeFilter {
    fn from(project_id: u64) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

/// Write payload for attribute create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttributeData {
    /// The project the attribute belongs to. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    /// Unique key used to reference the attribute from code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Human-readable name of the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description of what the attribute captures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the attribute is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl OptimizelyClient {
    /// Retrieves the attributes in a project.
    ///
    /// Accepts either a full [`AttributeFilter`] or a bare project id.
    pub async fn list_attributes(
        &self,
        filter: impl Into<AttributeFilter>,
    ) -> Result<ApiResponse<Vec<Attribute>>> {
        let filter = filter.into();
        require_field(filter.project_id.as_deref(), "project_id")?;
        let url = self.endpoint("attributes")?;
        self.execute(self.http.get(url).query(&filter)).await
    }

    /// Retrieves a single attribute by id.
    pub async fn get_attribute(
        &self,
        id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<Attribute>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("attributes/{id}"))?;
        self.execute(self.http.get(url)).await
    }

    /// Creates an attribute.
    pub async fn create_attribute(
        &self,
        attribute: &AttributeData,
    ) -> Result<ApiResponse<Attribute>> {
        let url = self.endpoint("attributes")?;
        self.execute(self.http.post(url).json(attribute)).await
    }

    /// Updates an existing attribute.
    pub async fn update_attribute(
        &self,
        id: impl Into<ResourceId>,
        attribute: &AttributeData,
    ) -> Result<ApiResponse<Attribute>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("attributes/{id}"))?;
        self.execute(self.http.put(url).json(attribute)).await
    }

    /// Deletes an attribute.
    pub async fn delete_attribute(
        &self,
        id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("attributes/{id}"))?;
        self.execute(self.http.delete(url)).await
    }
}
