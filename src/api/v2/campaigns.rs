//
//  optimizely-client
//  api/v2/campaigns.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Campaign resource types and operations.
//!
//! Campaigns group experiments and personalization experiences that share
//! pages and traffic allocation. Campaign results use the same reporting
//! window filter as experiment results.

use serde::{Deserialize, Serialize};

use crate::api::client::OptimizelyClient;
use crate::api::common::{ApiResponse, ResourceId, Result};

use super::experiments::ResultsFilter;
use super::require_field;

/// Represents an Optimizely campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// Unique identifier for the campaign.
    pub id: i64,

    /// The project this campaign belongs to.
    #[serde(default)]
    pub project_id: Option<i64>,

    /// Human-readable name of the campaign.
    #[serde(default)]
    pub name: Option<String>,

    /// Campaign type: `a/b` or `personalization`.
    #[serde(default, rename = "type")]
    pub campaign_type: Option<String>,

    /// Lifecycle status: `not_started`, `running`, `paused`, or `archived`.
    #[serde(default)]
    pub status: Option<String>,

    /// Pages the campaign is active on.
    #[serde(default)]
    pub page_ids: Vec<i64>,

    /// Experiments running inside the campaign.
    #[serde(default)]
    pub experiment_ids: Vec<i64>,

    /// Percentage of traffic held back from the campaign, in basis points.
    #[serde(default)]
    pub holdback: Option<i64>,

    /// ISO 8601 timestamp indicating when the campaign was created.
    #[serde(default)]
    pub created: Option<String>,

    /// ISO 8601 timestamp indicating when the campaign was last modified.
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// Query filter for [`list_campaigns`](OptimizelyClient::list_campaigns).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignFilter {
    /// The project to list campaigns for. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Page number to fetch (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of campaigns per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl From<&str> for CampaignFilter {
    fn from(project_id: &str) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for CampaignFilter {
    fn from(project_id: String) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

impl From<u64> for CampaignFilter {
    fn from(project_id: u64) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

/// Write payload for campaign create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignData {
    /// The project the campaign belongs to. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    /// Human-readable name of the campaign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Campaign type: `a/b` or `personalization`.
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub campaign_type: Option<String>,

    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Pages to activate the campaign on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_ids: Option<Vec<i64>>,

    /// Percentage of traffic held back, in basis points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holdback: Option<i64>,
}

impl OptimizelyClient {
    /// Retrieves the campaigns in a project.
    ///
    /// Accepts either a full [`CampaignFilter`] or a bare project id.
    pub async fn list_campaigns(
        &self,
        filter: impl Into<CampaignFilter>,
    ) -> Result<ApiResponse<Vec<Campaign>>> {
        let filter = filter.into();
        require_field(filter.project_id.as_deref(), "project_id")?;
        let url = self.endpoint("campaigns")?;
        self.execute(self.http.get(url).query(&filter)).await
    }

    /// Retrieves a single campaign by id.
    pub async fn get_campaign(&self, id: impl Into<ResourceId>) -> Result<ApiResponse<Campaign>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("campaigns/{id}"))?;
        self.execute(self.http.get(url)).await
    }

    /// Creates a campaign.
    pub async fn create_campaign(&self, campaign: &CampaignData) -> Result<ApiResponse<Campaign>> {
        let url = self.endpoint("campaigns")?;
        self.execute(self.http.post(url).json(campaign)).await
    }

    /// Updates an existing campaign.
    pub async fn update_campaign(
        &self,
        id: impl Into<ResourceId>,
        campaign: &CampaignData,
    ) -> Result<ApiResponse<Campaign>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("campaigns/{id}"))?;
        self.execute(self.http.put(url).json(campaign)).await
    }

    /// Deletes a campaign.
    pub async fn delete_campaign(
        &self,
        id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("campaigns/{id}"))?;
        self.execute(self.http.delete(url)).await
    }

    /// Retrieves the results of a campaign as raw JSON.
    pub async fn get_campaign_results(
        &self,
        id: impl Into<ResourceId>,
        filter: &ResultsFilter,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("campaigns/{id}/results"))?;
        self.execute(self.http.get(url).query(filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use mockito::{Matcher, Server, ServerGuard};

    fn test_client(server: &ServerGuard) -> OptimizelyClient {
        OptimizelyClient::new(Credentials {
            access_token: Some("test-token".to_string()),
            ..Default::default()
        })
        .unwrap()
        .with_base_url(&format!("{}/v2/", server.url()))
        .unwrap()
    }

    #[tokio::test]
    async fn test_campaign_results_route_and_filter() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/campaigns/12/results")
            .match_query(Matcher::UrlEncoded("end_time".into(), "2025-06-30".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"campaign_id":12}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client
            .get_campaign_results(
                12u64,
                &ResultsFilter {
                    end_time: Some("2025-06-30".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(response.payload["campaign_id"], 12);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_campaign_uses_put() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/v2/campaigns/12")
            .match_body(Matcher::Json(serde_json::json!({"status": "paused"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":12,"status":"paused"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client
            .update_campaign(
                12u64,
                &CampaignData {
                    status: Some("paused".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(response.payload.status.as_deref(), Some("paused"));
        mock.assert_async().await;
    }
}
