//! Sonatype Lifecycle API client
//!
//! The reconciliation engine only talks to the server through [`LifecycleApi`],
//! so tests can swap in the in-memory mock.

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
pub mod lifecycle;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use lifecycle::LifecycleClient;
#[cfg(test)]
pub use mock::MockLifecycleClient;
pub use models::{
    Application, CreateApplicationRequest, CreateOrganizationRequest, Organization, OwnerType,
    SourceControl, SourceControlEvaluationRequest,
};

/// Sonatype Lifecycle operations used by the importer
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    /// List every organization on the server
    async fn list_organizations(&self) -> Result<Vec<Organization>>;

    /// List every application on the server
    async fn list_applications(&self) -> Result<Vec<Application>>;

    /// Find organizations whose name matches exactly
    async fn find_organizations_by_name(&self, name: &str) -> Result<Vec<Organization>>;

    /// Create an organization.
    ///
    /// A name collision surfaces as `ApiError::BadRequest` carrying the
    /// server's response body.
    async fn create_organization(&self, request: CreateOrganizationRequest)
    -> Result<Organization>;

    /// Create an application. Collisions surface as for organizations.
    async fn create_application(&self, request: CreateApplicationRequest) -> Result<Application>;

    /// Attach source control configuration to an entity that has none
    async fn add_source_control(
        &self,
        owner: OwnerType,
        owner_id: &str,
        config: &SourceControl,
    ) -> Result<()>;

    /// Replace the source control configuration of an entity
    async fn update_source_control(
        &self,
        owner: OwnerType,
        owner_id: &str,
        config: &SourceControl,
    ) -> Result<()>;

    /// Request a source control policy evaluation for an application
    async fn evaluate_source_control(
        &self,
        application_id: &str,
        request: SourceControlEvaluationRequest,
    ) -> Result<()>;
}
