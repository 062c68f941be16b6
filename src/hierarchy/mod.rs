//! Discovered source-control hierarchy
//!
//! A read-only tree of raw, unsanitised names produced by an SCM provider.
//! The reconciliation engine walks it; nothing here talks to a server.

use serde::{Deserialize, Serialize};

use crate::sanitize::{self, Sanitizer};
use crate::scm::ScmKind;

pub mod tree;

pub use tree::render_tree;

/// A repository that becomes a Sonatype Lifecycle application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Raw repository name
    pub name: String,

    /// Default branch, absent for empty repositories
    pub default_branch: Option<String>,

    /// Clone URL as reported by the provider
    pub repository_url: String,
}

impl Application {
    pub fn new(
        name: impl Into<String>,
        default_branch: Option<&str>,
        repository_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_branch: default_branch.map(str::to_string),
            repository_url: repository_url.into(),
        }
    }

    pub fn safe_name(&self, sanitizer: &Sanitizer) -> String {
        sanitizer.safe_name(&self.name)
    }

    pub fn safe_id(&self, sanitizer: &Sanitizer) -> String {
        sanitizer.safe_id(&self.name)
    }

    pub fn is_branch_name_permitted(&self) -> bool {
        sanitize::is_branch_name_permitted(self.default_branch.as_deref())
    }

    pub fn is_repository_url_permitted(&self) -> bool {
        sanitize::is_repository_url_permitted(&self.repository_url)
    }

    /// Default branch, when both permission gates pass.
    pub fn permitted_branch(&self) -> Option<&str> {
        if self.is_branch_name_permitted() && self.is_repository_url_permitted() {
            self.default_branch.as_deref()
        } else {
            None
        }
    }
}

/// An account, project or group that becomes a Sonatype Lifecycle organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Raw name
    pub name: String,

    /// Provider the organization was discovered in
    pub scm_provider: ScmKind,

    #[serde(default)]
    pub applications: Vec<Application>,

    #[serde(default)]
    pub sub_organizations: Vec<Organization>,
}

impl Organization {
    pub fn new(name: impl Into<String>, scm_provider: ScmKind) -> Self {
        Self {
            name: name.into(),
            scm_provider,
            applications: Vec::new(),
            sub_organizations: Vec::new(),
        }
    }

    pub fn with_applications(mut self, applications: Vec<Application>) -> Self {
        self.applications = applications;
        self
    }

    pub fn with_sub_organizations(mut self, sub_organizations: Vec<Organization>) -> Self {
        self.sub_organizations = sub_organizations;
        self
    }

    pub fn safe_name(&self, sanitizer: &Sanitizer) -> String {
        sanitizer.safe_name(&self.name)
    }

    /// Organizations in this subtree, including this one.
    pub fn organization_count(&self) -> usize {
        1 + self
            .sub_organizations
            .iter()
            .map(Organization::organization_count)
            .sum::<usize>()
    }

    /// Applications in this subtree.
    pub fn application_count(&self) -> usize {
        self.applications.len()
            + self
                .sub_organizations
                .iter()
                .map(Organization::application_count)
                .sum::<usize>()
    }
}

/// Top-level organizations discovered in one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyRoot {
    pub organizations: Vec<Organization>,
}

impl HierarchyRoot {
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    pub fn organization_count(&self) -> usize {
        self.organizations
            .iter()
            .map(Organization::organization_count)
            .sum()
    }

    pub fn application_count(&self) -> usize {
        self.organizations
            .iter()
            .map(Organization::application_count)
            .sum()
    }
}
