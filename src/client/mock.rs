//! Mock Sonatype Lifecycle client for testing
//!
//! Provides an in-memory implementation of [`LifecycleApi`] for unit testing
//! the reconciliation engine without making real API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{
    Application, CreateApplicationRequest, CreateOrganizationRequest, Organization, OwnerType,
    SourceControl, SourceControlEvaluationRequest,
};
use super::LifecycleApi;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure server state and scripted failures via builder methods, then
/// inspect call counts and captured requests after the code under test ran.
///
/// # Example
/// ```ignore
/// let mock = MockLifecycleClient::new()
///     .with_orgs(vec![OrganizationBuilder::root().build()])
///     .await
///     .with_org_create_failures(vec![ApiError::BadRequest("x used as a name.".into())])
///     .await;
/// ```
#[derive(Default)]
pub struct MockLifecycleClient {
    /// Organizations returned from list_organizations / find_organizations_by_name
    orgs: Arc<Mutex<Vec<Organization>>>,
    /// Applications returned from list_applications
    apps: Arc<Mutex<Vec<Application>>>,
    /// Errors returned by successive create_organization calls before succeeding
    org_create_failures: Arc<Mutex<VecDeque<ApiError>>>,
    /// Errors returned by successive create_application calls before succeeding
    app_create_failures: Arc<Mutex<VecDeque<ApiError>>>,
    /// Error returned by listing calls - consumed on first use
    list_error: Arc<Mutex<Option<ApiError>>>,
    /// Error returned by source control calls - consumed on first use
    source_control_error: Arc<Mutex<Option<ApiError>>>,
    /// Error returned by every evaluation call
    evaluation_error: Arc<Mutex<Option<String>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_organizations: usize,
    pub list_applications: usize,
    pub find_organizations: usize,
    pub create_organization: usize,
    pub create_application: usize,
    pub add_source_control: usize,
    pub update_source_control: usize,
    pub evaluate_source_control: usize,
}

impl CallCounts {
    /// Total number of mutating calls.
    pub fn mutations(&self) -> usize {
        self.create_organization
            + self.create_application
            + self.add_source_control
            + self.update_source_control
            + self.evaluate_source_control
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedRequest {
    CreateOrganization {
        name: String,
        parent_id: String,
    },
    CreateApplication {
        public_id: String,
        name: String,
        organization_id: String,
    },
    AddSourceControl {
        owner: OwnerType,
        owner_id: String,
        config: SourceControl,
    },
    UpdateSourceControl {
        owner: OwnerType,
        owner_id: String,
        config: SourceControl,
    },
    Evaluate {
        application_id: String,
        branch_name: String,
        stage_id: String,
    },
}

impl MockLifecycleClient {
    /// Create a new mock client with an empty server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure organizations already present on the server.
    pub async fn with_orgs(self, orgs: Vec<Organization>) -> Self {
        *self.orgs.lock().await = orgs;
        self
    }

    /// Configure applications already present on the server.
    pub async fn with_apps(self, apps: Vec<Application>) -> Self {
        *self.apps.lock().await = apps;
        self
    }

    /// Queue errors for the next create_organization calls.
    pub async fn with_org_create_failures(self, failures: Vec<ApiError>) -> Self {
        *self.org_create_failures.lock().await = failures.into();
        self
    }

    /// Queue errors for the next create_application calls.
    pub async fn with_app_create_failures(self, failures: Vec<ApiError>) -> Self {
        *self.app_create_failures.lock().await = failures.into();
        self
    }

    /// Configure an error for the next listing call.
    pub async fn with_list_error(self, error: ApiError) -> Self {
        *self.list_error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next source control call.
    pub async fn with_source_control_error(self, error: ApiError) -> Self {
        *self.source_control_error.lock().await = Some(error);
        self
    }

    /// Make every evaluation request fail with a server error.
    pub async fn with_evaluation_error(self, message: &str) -> Self {
        *self.evaluation_error.lock().await = Some(message.to_string());
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured mutating requests in call order.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Names of every attempted organization create, in order.
    pub async fn attempted_org_names(&self) -> Vec<String> {
        self.captured_requests()
            .await
            .into_iter()
            .filter_map(|r| match r {
                CapturedRequest::CreateOrganization { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Public ids of every attempted application create, in order.
    pub async fn attempted_app_ids(&self) -> Vec<String> {
        self.captured_requests()
            .await
            .into_iter()
            .filter_map(|r| match r {
                CapturedRequest::CreateApplication { public_id, .. } => Some(public_id),
                _ => None,
            })
            .collect()
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }

    async fn check_list_error(&self) -> Result<()> {
        if let Some(e) = self.list_error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn check_source_control_error(&self) -> Result<()> {
        if let Some(e) = self.source_control_error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl LifecycleApi for MockLifecycleClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.check_list_error().await?;
        self.call_count.lock().await.list_organizations += 1;
        Ok(self.orgs.lock().await.clone())
    }

    async fn list_applications(&self) -> Result<Vec<Application>> {
        self.check_list_error().await?;
        self.call_count.lock().await.list_applications += 1;
        Ok(self.apps.lock().await.clone())
    }

    async fn find_organizations_by_name(&self, name: &str) -> Result<Vec<Organization>> {
        self.check_list_error().await?;
        self.call_count.lock().await.find_organizations += 1;
        Ok(self
            .orgs
            .lock()
            .await
            .iter()
            .filter(|o| o.name == name)
            .cloned()
            .collect())
    }

    async fn create_organization(
        &self,
        request: CreateOrganizationRequest,
    ) -> Result<Organization> {
        self.capture(CapturedRequest::CreateOrganization {
            name: request.name.clone(),
            parent_id: request.parent_organization_id.clone(),
        })
        .await;

        let attempt = {
            let mut counts = self.call_count.lock().await;
            counts.create_organization += 1;
            counts.create_organization
        };

        if let Some(e) = self.org_create_failures.lock().await.pop_front() {
            return Err(e.into());
        }

        let org = Organization {
            id: format!("org-id-{}", attempt),
            name: request.name,
            parent_organization_id: Some(request.parent_organization_id),
        };
        self.orgs.lock().await.push(org.clone());
        Ok(org)
    }

    async fn create_application(&self, request: CreateApplicationRequest) -> Result<Application> {
        self.capture(CapturedRequest::CreateApplication {
            public_id: request.public_id.clone(),
            name: request.name.clone(),
            organization_id: request.organization_id.clone(),
        })
        .await;

        let attempt = {
            let mut counts = self.call_count.lock().await;
            counts.create_application += 1;
            counts.create_application
        };

        if let Some(e) = self.app_create_failures.lock().await.pop_front() {
            return Err(e.into());
        }

        let app = Application {
            id: format!("app-id-{}", attempt),
            public_id: request.public_id,
            name: request.name,
            organization_id: request.organization_id,
        };
        self.apps.lock().await.push(app.clone());
        Ok(app)
    }

    async fn add_source_control(
        &self,
        owner: OwnerType,
        owner_id: &str,
        config: &SourceControl,
    ) -> Result<()> {
        self.capture(CapturedRequest::AddSourceControl {
            owner,
            owner_id: owner_id.to_string(),
            config: config.clone(),
        })
        .await;
        self.call_count.lock().await.add_source_control += 1;
        self.check_source_control_error().await
    }

    async fn update_source_control(
        &self,
        owner: OwnerType,
        owner_id: &str,
        config: &SourceControl,
    ) -> Result<()> {
        self.capture(CapturedRequest::UpdateSourceControl {
            owner,
            owner_id: owner_id.to_string(),
            config: config.clone(),
        })
        .await;
        self.call_count.lock().await.update_source_control += 1;
        self.check_source_control_error().await
    }

    async fn evaluate_source_control(
        &self,
        application_id: &str,
        request: SourceControlEvaluationRequest,
    ) -> Result<()> {
        self.capture(CapturedRequest::Evaluate {
            application_id: application_id.to_string(),
            branch_name: request.branch_name,
            stage_id: request.stage_id,
        })
        .await;
        self.call_count.lock().await.evaluate_source_control += 1;

        match self.evaluation_error.lock().await.as_ref() {
            Some(message) => Err(ApiError::ServerError(message.clone()).into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::OrganizationBuilder;

    #[tokio::test]
    async fn test_mock_create_organization_consumes_failures_in_order() {
        let mock = MockLifecycleClient::new()
            .with_org_create_failures(vec![ApiError::BadRequest("first".to_string())])
            .await;

        let request = CreateOrganizationRequest {
            name: "Org".to_string(),
            parent_organization_id: "root".to_string(),
        };

        assert!(mock.create_organization(request.clone()).await.is_err());
        let created = mock.create_organization(request).await.unwrap();

        assert_eq!(created.id, "org-id-2");
        assert_eq!(mock.call_counts().await.create_organization, 2);
        assert_eq!(mock.attempted_org_names().await, vec!["Org", "Org"]);
    }

    #[tokio::test]
    async fn test_mock_find_by_name() {
        let mock = MockLifecycleClient::new()
            .with_orgs(vec![
                OrganizationBuilder::root().build(),
                OrganizationBuilder::new("o-1").name("Team-A").build(),
            ])
            .await;

        let found = mock.find_organizations_by_name("Team-A").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "o-1");
    }

    #[tokio::test]
    async fn test_mock_list_error_is_consumed() {
        let mock = MockLifecycleClient::new()
            .with_list_error(ApiError::Unauthorized)
            .await;

        assert!(mock.list_organizations().await.is_err());
        assert!(mock.list_organizations().await.is_ok());
    }
}
