//! Source-control providers
//!
//! A provider enumerates its accounts, projects and repositories as a
//! [`HierarchyRoot`] and supplies the credentials Sonatype Lifecycle needs to
//! read those repositories.

use std::fmt;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::client::SourceControl;
use crate::error::Result;
use crate::hierarchy::HierarchyRoot;

pub mod azure;

pub use azure::AzureDevOpsProvider;

/// Supported source-control providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScmKind {
    /// Azure DevOps
    Azure,
}

impl ScmKind {
    /// Provider tag understood by Sonatype Lifecycle.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScmKind::Azure => "azure",
        }
    }

    /// Human readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ScmKind::Azure => "Azure DevOps",
        }
    }
}

impl fmt::Display for ScmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials shared by every top-level organization of one run
#[derive(Clone, PartialEq)]
pub struct ScmConfiguration {
    pub provider: ScmKind,
    pub username: Option<String>,
    pub token: String,
}

impl ScmConfiguration {
    /// Organization-level source control settings: evaluations on,
    /// pull-request automation off.
    pub fn organization_source_control(&self) -> SourceControl {
        SourceControl {
            username: self.username.clone(),
            token: Some(self.token.clone()),
            provider: Some(self.provider.as_str().to_string()),
            remediation_pull_requests_enabled: Some(false),
            pull_request_commenting_enabled: Some(false),
            source_control_evaluations_enabled: Some(true),
            ssh_enabled: Some(false),
            commit_status_enabled: Some(false),
            ..Default::default()
        }
    }
}

impl fmt::Debug for ScmConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScmConfiguration")
            .field("provider", &self.provider)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A source-control system that can be imported
#[async_trait]
pub trait ScmProvider: Send + Sync {
    fn kind(&self) -> ScmKind;

    /// Enumerate the provider's hierarchy with raw names
    async fn discover_hierarchy(&self) -> Result<HierarchyRoot>;

    /// Credentials to attach to top-level organizations
    fn scm_config(&self) -> ScmConfiguration;
}
