//! Sonatype Lifecycle REST client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{
    Application, CreateApplicationRequest, CreateOrganizationRequest, LifecycleApi, Organization,
    OwnerType, SourceControl, SourceControlEvaluationRequest,
};
use crate::error::{ApiError, Result};

/// Default Sonatype Lifecycle URL
pub const DEFAULT_URL: &str = "http://localhost:8070";

/// Default request rate against the server
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 20;

/// Sonatype Lifecycle API client using HTTP basic authentication
pub struct LifecycleClient {
    http: HttpClient,
    base_url: String,
    username: String,
    password: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl LifecycleClient {
    /// Create a new client for the server at `base_url`
    pub fn new(
        base_url: &str,
        username: &str,
        password: &str,
        requests_per_second: u32,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated request for an API path
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Send a request and map non-success statuses to [`ApiError`]
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        self.rate_limiter.until_ready().await;

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                debug!("Response Body: {}", error_msg);
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    /// Send a request and parse the JSON body
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    fn source_control_path(owner: OwnerType, owner_id: &str) -> String {
        format!("/api/v2/sourceControl/{}/{}", owner.as_path(), owner_id)
    }
}

#[derive(Deserialize)]
struct OrganizationsResponse {
    organizations: Vec<Organization>,
}

#[derive(Deserialize)]
struct ApplicationsResponse {
    applications: Vec<Application>,
}

#[async_trait]
impl LifecycleApi for LifecycleClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let response: OrganizationsResponse = self
            .send_json(self.request(Method::GET, "/api/v2/organizations"))
            .await?;
        Ok(response.organizations)
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        let response: ApplicationsResponse = self
            .send_json(self.request(Method::GET, "/api/v2/applications"))
            .await?;
        Ok(response.applications)
    }

    async fn find_organizations_by_name(&self, name: &str) -> Result<Vec<Organization>> {
        let builder = self
            .request(Method::GET, "/api/v2/organizations")
            .query(&[("organizationName", name)]);
        let response: OrganizationsResponse = self.send_json(builder).await?;

        // The server matches loosely on some versions; keep exact matches only.
        Ok(response
            .organizations
            .into_iter()
            .filter(|o| o.name == name)
            .collect())
    }

    async fn create_organization(
        &self,
        request: CreateOrganizationRequest,
    ) -> Result<Organization> {
        let builder = self
            .request(Method::POST, "/api/v2/organizations")
            .json(&request);
        self.send_json(builder).await
    }

    async fn create_application(&self, request: CreateApplicationRequest) -> Result<Application> {
        let builder = self
            .request(Method::POST, "/api/v2/applications")
            .json(&request);
        self.send_json(builder).await
    }

    async fn add_source_control(
        &self,
        owner: OwnerType,
        owner_id: &str,
        config: &SourceControl,
    ) -> Result<()> {
        let path = Self::source_control_path(owner, owner_id);
        self.send(self.request(Method::POST, &path).json(config))
            .await?;
        Ok(())
    }

    async fn update_source_control(
        &self,
        owner: OwnerType,
        owner_id: &str,
        config: &SourceControl,
    ) -> Result<()> {
        let path = Self::source_control_path(owner, owner_id);
        self.send(self.request(Method::PUT, &path).json(config))
            .await?;
        Ok(())
    }

    async fn evaluate_source_control(
        &self,
        application_id: &str,
        request: SourceControlEvaluationRequest,
    ) -> Result<()> {
        let path = format!(
            "/api/v2/evaluation/applications/{}/sourceControlEvaluation",
            application_id
        );
        self.send(self.request(Method::POST, &path).json(&request))
            .await?;
        Ok(())
    }
}
