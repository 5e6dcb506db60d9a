//
//  optimizely-client
//  api/v2/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project resource types and operations.
//!
//! Projects are the top-level container in Optimizely: every experiment,
//! audience, campaign, page, event, and attribute belongs to exactly one
//! project.
//!
//! # Overview
//!
//! | Operation | Route |
//! |-----------|-------|
//! | [`list_projects`](crate::OptimizelyClient::list_projects) | `GET /v2/projects` |
//! | [`get_project`](crate::OptimizelyClient::get_project) | `GET /v2/projects/{id}` |
//! | [`create_project`](crate::OptimizelyClient::create_project) | `POST /v2/projects` |
//! | [`update_project`](crate::OptimizelyClient::update_project) | `PUT /v2/projects/{id}` |
//!
//! # Example
//!
//! ```rust,no_run
//! use optimizely_client::api::v2::NewProject;
//! use optimizely_client::{Credentials, OptimizelyClient};
//!
//! # async fn example() -> optimizely_client::Result<()> {
//! let client = OptimizelyClient::new(Credentials {
//!     access_token: Some("token".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let created = client
//!     .create_project(&NewProject {
//!         name: "Checkout Redesign".to_string(),
//!         description: Some("A/B tests for the new checkout".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("created project {}", created.payload.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - Projects cannot be deleted through the API; archive them by updating
//!   `status` instead.
//! - Timestamps are ISO 8601 strings as returned by the API.

use serde::{Deserialize, Serialize};

use crate::api::client::OptimizelyClient;
use crate::api::common::{ApiResponse, ResourceId, Result};

/// Represents an Optimizely project.
///
/// # Fields
///
/// * `id` - Unique identifier for the project
/// * `account_id` - The account owning the project
/// * `name` - Human-readable project name
/// * `description` - Optional description of the project's purpose
/// * `platform` - Delivery platform (`web`, `ios`, `android`, `custom`)
/// * `status` - Lifecycle status (`active` or `archived`)
/// * `is_classic` - Whether this is a classic (pre-X) project
/// * `web_snippet` - Web snippet configuration, for web projects
/// * `created` - ISO 8601 timestamp of creation
/// * `last_modified` - ISO 8601 timestamp of the last update
///
/// # Example
///
/// ```rust
/// use optimizely_client::api::v2::Project;
///
/// let json = r#"{"id":1523456,"name":"Checkout","platform":"web","status":"active"}"#;
/// let project: Project = serde_json::from_str(json).unwrap();
/// assert_eq!(project.name, "Checkout");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project.
    pub id: i64,

    /// The account this project belongs to.
    #[serde(default)]
    pub account_id: Option<i64>,

    /// Human-readable name of the project.
    pub name: String,

    /// Optional description of the project's purpose.
    #[serde(default)]
    pub description: Option<String>,

    /// Delivery platform: `web`, `ios`, `android`, or `custom`.
    #[serde(default)]
    pub platform: Option<String>,

    /// Lifecycle status: `active` or `archived`.
    #[serde(default)]
    pub status: Option<String>,

    /// Whether this is a classic (pre-X) project.
    #[serde(default)]
    pub is_classic: Option<bool>,

    /// Web snippet configuration, present for web projects.
    #[serde(default)]
    pub web_snippet: Option<WebSnippet>,

    /// ISO 8601 timestamp indicating when the project was created.
    #[serde(default)]
    pub created: Option<String>,

    /// ISO 8601 timestamp indicating when the project was last modified.
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// Web snippet configuration embedded in a web project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSnippet {
    /// Whether forced variations via query parameter are enabled.
    #[serde(default)]
    pub enable_force_variation: Option<bool>,

    /// Whether paused experiments are stripped from the snippet.
    #[serde(default)]
    pub exclude_disabled_experiments: Option<bool>,

    /// Current revision number of the generated snippet.
    #[serde(default)]
    pub code_revision: Option<i64>,

    /// Size of the generated snippet in bytes.
    #[serde(default)]
    pub js_file_size: Option<i64>,
}

/// Query filter for [`list_projects`](OptimizelyClient::list_projects).
///
/// Only fields that are `Some` appear in the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectFilter {
    /// Page number to fetch (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of projects per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Payload for [`create_project`](OptimizelyClient::create_project).
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProject {
    /// Name of the new project. The only required field.
    pub name: String,

    /// Optional description of the project's purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Delivery platform; the API defaults to `web`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Initial lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Partial payload for [`update_project`](OptimizelyClient::update_project).
///
/// Only fields that are `Some` are sent, so unset fields keep their current
/// value upstream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    /// New project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New project description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New lifecycle status (`active` or `archived`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl OptimizelyClient {
    /// Retrieves a page of projects.
    ///
    /// # Parameters
    ///
    /// * `filter` - Pagination options; `Default::default()` fetches the
    ///   first page with the API's default page size
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use optimizely_client::api::v2::ProjectFilter;
    /// # use optimizely_client::{Credentials, OptimizelyClient};
    ///
    /// # async fn example(client: OptimizelyClient) -> optimizely_client::Result<()> {
    /// let page = client
    ///     .list_projects(&ProjectFilter {
    ///         page: Some(2),
    ///         per_page: Some(25),
    ///     })
    ///     .await?;
    ///
    /// for project in &page.payload {
    ///     println!("{}: {}", project.id, project.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<ApiResponse<Vec<Project>>> {
        let url = self.endpoint("projects")?;
        self.execute(self.http.get(url).query(filter)).await
    }

    /// Retrieves a single project by id.
    ///
    /// The id may be passed as a string or a number.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`](crate::Error::Validation) before any
    /// network call when the id is empty.
    pub async fn get_project(&self, id: impl Into<ResourceId>) -> Result<ApiResponse<Project>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("projects/{id}"))?;
        self.execute(self.http.get(url)).await
    }

    /// Creates a new project.
    pub async fn create_project(&self, project: &NewProject) -> Result<ApiResponse<Project>> {
        let url = self.endpoint("projects")?;
        self.execute(self.http.post(url).json(project)).await
    }

    /// Updates an existing project.
    pub async fn update_project(
        &self,
        id: impl Into<ResourceId>,
        update: &ProjectUpdate,
    ) -> Result<ApiResponse<Project>> {
        let id = id.into().require("id")?;
        let url = self.endpoint(&format!("projects/{id}"))?;
        self.execute(self.http.put(url).json(update)).await
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
    async fn test_create_project_returns_full_envelope() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/projects")
            .match_header("authorization", "Bearer test-token")
            .match_header("content-type", "application/json")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_header("x-ratelimit-remaining", "42")
            .with_body(r#"{"id":1,"name":"P"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client
            .create_project(&NewProject {
                name: "P".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.status_code, 201);
        assert_eq!(response.payload.id, 1);
        assert_eq!(response.payload.name, "P");
        assert_eq!(response.meta.rate_limit_remaining.as_deref(), Some("42"));
        assert!(response.url.ends_with("/v2/projects"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_project_accepts_string_and_numeric_ids() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/projects/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":42,"name":"Answer"}"#)
            .expect(2)
            .create_async()
            .await;

        let client = test_client(&server);

        let by_string = client.get_project("42").await.unwrap();
        let by_number = client.get_project(42u64).await.unwrap();

        assert_eq!(by_string.payload.id, by_number.payload.id);
        assert_eq!(by_string.url, by_number.url);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_project_rejects_empty_id_before_dispatch() {
        let client = OptimizelyClient::new(Credentials::default()).unwrap();
        let err = client.get_project("").await.unwrap_err();
        assert!(matches!(err, Error::Validation("id")));
    }

    #[tokio::test]
    async fn test_non_2xx_becomes_api_error_with_upstream_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/projects/9")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"bad"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.get_project(9u64).await.unwrap_err();

        match err {
            Error::Api { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_projects_serializes_only_present_filters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/projects")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("per_page".into(), "25".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client
            .list_projects(&ProjectFilter {
                page: Some(2),
                per_page: Some(25),
            })
            .await
            .unwrap();

        assert!(response.payload.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_pagination_meta_parsed_from_link_header() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/projects")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header(
                "link",
                "<https://api.optimizely.com/v2/projects?page=2>; rel=next, \
                 <https://api.optimizely.com/v2/projects?page=9>; rel=last",
            )
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(&server);
        let response = client.list_projects(&ProjectFilter::default()).await.unwrap();

        assert_eq!(response.meta.next_page.as_deref(), Some("2"));
        assert_eq!(response.meta.last_page.as_deref(), Some("9"));
        assert!(response.meta.prev_page.is_none());
    }
}
