//! Snapshot of organizations and applications already on the server
//!
//! Loaded once per run before any mutation. The engine appends every entity
//! it creates so later siblings resolve against it without a re-fetch.

use log::info;

use crate::client::{Application, LifecycleApi, Organization};
use crate::error::{ImportError, Result};

#[derive(Debug, Default)]
pub struct EntityCache {
    organizations: Vec<Organization>,
    applications: Vec<Application>,
    loaded: bool,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every organization, then every application.
    ///
    /// Calling again after a successful load is a no-op. On failure the cache
    /// stays empty and unloaded.
    pub async fn initialize<A: LifecycleApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        if self.loaded {
            return Ok(());
        }

        let organizations = api
            .list_organizations()
            .await
            .map_err(|e| ImportError::CacheLoad(Box::new(e)))?;
        let applications = api
            .list_applications()
            .await
            .map_err(|e| ImportError::CacheLoad(Box::new(e)))?;

        info!(
            "Loaded {} existing Organizations and {} existing Applications",
            organizations.len(),
            applications.len()
        );

        self.organizations = organizations;
        self.applications = applications;
        self.loaded = true;
        Ok(())
    }

    pub fn organization_exists(&self, safe_name: &str, parent_id: &str) -> Option<&Organization> {
        self.organizations
            .iter()
            .find(|o| o.name == safe_name && o.is_child_of(parent_id))
    }

    /// An application in `organization_id` whose name or public id is taken.
    pub fn application_exists(
        &self,
        safe_name: &str,
        safe_id: &str,
        organization_id: &str,
    ) -> Option<&Application> {
        self.applications.iter().find(|a| {
            a.organization_id == organization_id && (a.name == safe_name || a.public_id == safe_id)
        })
    }

    pub fn push_organization(&mut self, organization: Organization) {
        self.organizations.push(organization);
    }

    pub fn push_application(&mut self, application: Application) {
        self.applications.push(application);
    }
}
