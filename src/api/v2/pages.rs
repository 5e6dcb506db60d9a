//
//  optimizely-client
//  api/v2/pages.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Page resource types and operations.
//!
//! Pages describe where on a site experiments and campaigns can activate:
//! a URL plus activation conditions. In-page events hang off pages and are
//! managed in the [`events`](super::events) module.

use serde::{Deserialize, Serialize};

use crate::api::client::OptimizelyClient;
use crate::api::common::{ApiResponse, ResourceId, Result};

use super::require_field;

/// Represents an Optimizely page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier for the page.
    pub id: i64,

    /// The project this page belongs to.
    #[serde(default)]
    pub project_id: Option<i64>,

    /// Human-readable name of the page.
    #[serde(default)]
    pub name: Option<String>,

    /// URL opened in the editor for this page.
    #[serde(default)]
    pub edit_url: Option<String>,

    /// Unique key used to reference the page from code.
    #[serde(default)]
    pub key: Option<String>,

    /// Page category shown in the Optimizely UI.
    #[serde(default)]
    pub category: Option<String>,

    /// Activation type: `immediate`, `manual`, `polling`, or `callback`.
    #[serde(default)]
    pub activation_type: Option<String>,

    /// Targeting conditions, in the API's JSON condition syntax.
    #[serde(default)]
    pub conditions: Option<String>,

    /// Whether the page has been archived.
    #[serde(default)]
    pub archived: Option<bool>,

    /// ISO 8601 timestamp indicating when the page was created.
    #[serde(default)]
    pub created: Option<String>,

    /// ISO 8601 timestamp indicating when the page was last modified.
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// Query filter for [`list_pages`](OptimizelyClient::list_pages).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageFilter {
    /// The project to list pages for. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Page number to fetch (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of pages per page of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl From<&str> for PageFilter {
    fn from(project_id: &str) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for PageFilter {
    fn from(project_id: String) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

impl From<u64> for PageFilter {
    fn from(project_id: u64) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

/// Write payload for page create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageData {
    /// The project the page belongs to. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    /// Human-readable name of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL opened in the editor for this page. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,

    /// Unique key used to reference the page from code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Page category shown in the Optimizely UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Activation type: `immediate`, `manual`, `polling`, or `callback`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_type: Option<String>,

    /// Targeting conditions, in the API's JSON condition syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,

    /// Whether the page is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl OptimizelyClient {
    /// Retrieves the pages in a project.
    ///
    /// Accepts either a full [`PageFilter`] or a bare project id.
    pub async fn list_pages(
        &self,
        filter: impl Into<PageFilter>,
    ) -> Result<ApiResponse<Vec<Page>>> {
        let filter = filter.into();
        require_field(filter.project_id.as_deref(), "project_id")?;
        let url = self.endpoint("pages")?;
        self.execute(self.http.get(url).query(&filter)).await
    }

    /// Retrieves a single page by id.
    pub async fn get_page(&self, id: impl Into<ResourceId>) -> Result<ApiResponse<Page>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("pages/{id}"))?;
        self.execute(self.http.get(url)).await
    }

    /// Creates a page.
    pub async fn create_page(&self, page: &PageData) -> Result<ApiResponse<Page>> {
        let url = self.endpoint("pages")?;
        self.execute(self.http.post(url).json(page)).await
    }

    /// Updates an existing page.
    pub async fn update_page(
        &self,
        id: impl Into<ResourceId>,
        page: &PageData,
    ) -> Result<ApiResponse<Page>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("pages/{id}"))?;
        self.execute(self.http.put(url).json(page)).await
    }

    /// Deletes a page.
    pub async fn delete_page(
        &self,
        id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("pages/{id}"))?;
        self.execute(self.http.delete(url)).await
    }
}
