//
//  optimizely-client
//  api/v2/experiments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Experiment resource types and operations.
//!
//! Experiments are the unit of testing in Optimizely: a set of variations
//! run against an audience, with results reported per metric.
//!
//! # Overview
//!
//! | Operation | Route | Verb |
//! |-----------|-------|------|
//! | `list_experiments` | `/v2/experiments?project_id=` | GET |
//! | `get_experiment` | `/v2/experiments/{id}` | GET |
//! | `create_experiment` | `/v2/experiments?action=` | POST |
//! | `update_experiment` | `/v2/experiments/{id}` | PATCH |
//! | `delete_experiment` | `/v2/experiments/{id}` | DELETE |
//! | `get_experiment_results` | `/v2/experiments/{id}/results` | GET |
//!
//! Experiment update is a *partial* update (PATCH): only the fields present
//! in the payload are touched upstream.

use serde::{Deserialize, Serialize};

use crate::api::client::OptimizelyClient;
use crate::api::common::{ApiResponse, ResourceId, Result};

use super::require_field;

/// Represents an Optimizely experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    /// Unique identifier for the experiment.
    pub id: i64,

    /// The project this experiment belongs to.
    #[serde(default)]
    pub project_id: Option<i64>,

    /// The campaign this experiment runs in, if any.
    #[serde(default)]
    pub campaign_id: Option<i64>,

    /// Human-readable name of the experiment.
    #[serde(default)]
    pub name: Option<String>,

    /// Optional description shown in the Optimizely UI.
    #[serde(default)]
    pub description: Option<String>,

    /// Lifecycle status: `not_started`, `running`, `paused`, or `archived`.
    #[serde(default)]
    pub status: Option<String>,

    /// The variations under test.
    #[serde(default)]
    pub variations: Vec<Variation>,

    /// ISO 8601 timestamp indicating when the experiment was created.
    #[serde(default)]
    pub created: Option<String>,

    /// ISO 8601 timestamp indicating when the experiment was last modified.
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// A single variation within an experiment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Variation {
    /// Unique identifier for the variation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<i64>,

    /// Human-readable name of the variation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Traffic weight in basis points (all variations sum to 10000).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,

    /// Whether the variation has been archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Query filter for [`list_experiments`](OptimizelyClient::list_experiments).
///
/// A plain project id converts directly into a filter, mirroring the
/// id-shorthand accepted by the single-resource methods:
///
/// ```rust
/// use optimizely_client::api::v2::ExperimentFilter;
///
/// let filter: ExperimentFilter = 9000u64.into();
/// assert_eq!(filter.project_id.as_deref(), Some("9000"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExperimentFilter {
    /// The project to list experiments for. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Restrict the listing to a single campaign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,

    /// Include classic (pre-X) experiments in the listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_classic: Option<bool>,

    /// Page number to fetch (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of experiments per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl From<&str> for ExperimentFilter {
    fn from(project_id: &str) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

impl From<String> for ExperimentFilter {
    fn from(project_id: String) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

impl From<u64> for ExperimentFilter {
    fn from(project_id: u64) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        }
    }
}

/// Query parameters for experiment create/update calls.
///
/// The `action` parameter tells the API what to do with the experiment on
/// write: `publish`, `pause`, `resume`, or `start`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExperimentParams {
    /// Action to perform alongside the write. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Write payload for experiment create and (partial) update calls.
///
/// Only fields that are `Some` are serialized, so a PATCH touches nothing
/// else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExperimentData {
    /// The project the experiment belongs to. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    /// The campaign to run the experiment in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,

    /// Human-readable name of the experiment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description shown in the Optimizely UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The variations under test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<Variation>>,
}

/// Query filter for the results endpoints.
///
/// Shared by experiment and campaign results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultsFilter {
    /// Inclusive start of the reporting window (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// Inclusive end of the reporting window (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl OptimizelyClient {
    /// Retrieves the experiments in a project.
    ///
    /// Accepts either a full [`ExperimentFilter`] or a bare project id.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`](crate::Error::Validation) before any network call when no
    /// project id is provided.
    pub async fn list_experiments(
        &self,
        filter: impl Into<ExperimentFilter>,
    ) -> Result<ApiResponse<Vec<Experiment>>> {
        let filter = filter.into();
        require_field(filter.project_id.as_deref(), "project_id")?;
        let url = self.endpoint("experiments")?;
        self.execute(self.http.get(url).query(&filter)).await
    }

    /// Retrieves a single experiment by id.
    pub async fn get_experiment(
        &self,
        id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<Experiment>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("experiments/{id}"))?;
        self.execute(self.http.get(url)).await
    }

    /// Creates an experiment.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`](crate::Error::Validation) when `params.action` is absent; the
    /// API refuses a create without one.
    pub async fn create_experiment(
        &self,
        params: &ExperimentParams,
        experiment: &ExperimentData,
    ) -> Result<ApiResponse<Experiment>> {
        require_field(params.action.as_deref(), "action")?;
        let url = self.endpoint("experiments")?;
        self.execute(self.http.post(url).query(params).json(experiment))
            .await
    }

    /// Partially updates an experiment (PATCH).
    ///
    /// Only the fields present in `experiment` are modified upstream.
    pub async fn update_experiment(
        &self,
        id: impl Into<ResourceId>,
        params: &ExperimentParams,
        experiment: &ExperimentData,
    ) -> Result<ApiResponse<Experiment>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("experiments/{id}"))?;
        self.execute(self.http.patch(url).query(params).json(experiment))
            .await
    }

    /// Deletes an experiment.
    ///
    /// The API answers with an empty body, so the payload is JSON `null`.
    pub async fn delete_experiment(
        &self,
        id: impl Into<ResourceId>,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("experiments/{id}"))?;
        self.execute(self.http.delete(url)).await
    }

    /// Retrieves the results of an experiment.
    ///
    /// The results schema is large and changes with the metrics configured
    /// on the experiment, so the payload is returned as raw JSON.
    pub async fn get_experiment_results(
        &self,
        id: impl Into<ResourceId>,
        filter: &ResultsFilter,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("experiments/{id}/results"))?;
        self.execute(self.http.get(url).query(filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::Error;
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
    async fn test_list_experiments_accepts_project_id_shorthand() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/experiments")
            .match_query(Matcher::UrlEncoded("project_id".into(), "9000".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":7,"project_id":9000,"name":"exp"}]"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client.list_experiments(9000u64).await.unwrap();

        assert_eq!(response.payload.len(), 1);
        assert_eq!(response.payload[0].id, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_experiments_requires_project_id() {
        let client = OptimizelyClient::new(Credentials::default()).unwrap();
        let err = client
            .list_experiments(ExperimentFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation("project_id")));
    }

    #[tokio::test]
    async fn test_create_experiment_requires_action() {
        let client = OptimizelyClient::new(Credentials::default()).unwrap();
        let err = client
            .create_experiment(&ExperimentParams::default(), &ExperimentData::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation("action")));
    }

    #[tokio::test]
    async fn test_update_experiment_uses_patch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/v2/experiments/77")
            .match_query(Matcher::UrlEncoded("action".into(), "publish".into()))
            .match_body(Matcher::Json(serde_json::json!({"status": "paused"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":77,"status":"paused"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client
            .update_experiment(
                77u64,
                &ExperimentParams {
                    action: Some("publish".to_string()),
                },
                &ExperimentData {
                    status: Some("paused".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(response.payload.status.as_deref(), Some("paused"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_experiment_handles_empty_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/v2/experiments/77")
            .with_status(204)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client.delete_experiment(77u64).await.unwrap();

        assert_eq!(response.status_code, 204);
        assert_eq!(response.payload, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_experiment_results_route() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/experiments/77/results")
            .match_query(Matcher::UrlEncoded("start_time".into(), "2025-01-01".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"experiment_id":77,"reach":{"total_count":100}}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client
            .get_experiment_results(
                77u64,
                &ResultsFilter {
                    start_time: Some("2025-01-01".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(response.payload["experiment_id"], 77);
        mock.assert_async().await;
    }
}
