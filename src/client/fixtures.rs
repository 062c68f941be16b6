//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use super::models::{Application, Organization};

/// ID of the server's built-in root organization
pub const ROOT_ORG_ID: &str = "ROOT_ORGANIZATION_ID";

// ============================================================================
// OrganizationBuilder
// ============================================================================

/// Builder for creating test Organization instances.
///
/// # Example
/// ```ignore
/// let org = OrganizationBuilder::new("org-123")
///     .name("Team-A")
///     .parent("ROOT_ORGANIZATION_ID")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct OrganizationBuilder {
    id: String,
    name: String,
    parent_organization_id: Option<String>,
}

impl OrganizationBuilder {
    /// Create a new builder under the root organization.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: format!("Organization {}", &id),
            id,
            parent_organization_id: Some(ROOT_ORG_ID.to_string()),
        }
    }

    /// The server's root organization.
    pub fn root() -> Self {
        Self {
            id: ROOT_ORG_ID.to_string(),
            name: "Root Organization".to_string(),
            parent_organization_id: None,
        }
    }

    /// Set the organization name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the parent organization ID.
    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_organization_id = Some(parent_id.into());
        self
    }

    /// Build the Organization.
    pub fn build(self) -> Organization {
        Organization {
            id: self.id,
            name: self.name,
            parent_organization_id: self.parent_organization_id,
        }
    }
}

// ============================================================================
// ApplicationBuilder
// ============================================================================

/// Builder for creating test Application instances.
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    id: String,
    public_id: String,
    name: String,
    organization_id: String,
}

impl ApplicationBuilder {
    /// Create a new builder with the given internal ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            public_id: id.to_lowercase(),
            name: format!("Application {}", &id),
            id,
            organization_id: ROOT_ORG_ID.to_string(),
        }
    }

    /// Set the public ID.
    pub fn public_id(mut self, public_id: impl Into<String>) -> Self {
        self.public_id = public_id.into();
        self
    }

    /// Set the application name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the owning organization ID.
    pub fn organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = organization_id.into();
        self
    }

    /// Build the Application.
    pub fn build(self) -> Application {
        Application {
            id: self.id,
            public_id: self.public_id,
            name: self.name,
            organization_id: self.organization_id,
        }
    }
}
