//! Source control configuration models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of entity a source control configuration is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    Organization,
    Application,
}

impl OwnerType {
    /// Path segment used by the source control endpoints.
    pub fn as_path(&self) -> &'static str {
        match self {
            OwnerType::Organization => "organization",
            OwnerType::Application => "application",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Source control configuration for an organization or application.
///
/// Every field is optional: organizations carry credentials and feature
/// flags, applications carry their repository URL and base branch.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_pull_requests_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_commenting_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_control_evaluations_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_status_enabled: Option<bool>,
}

impl SourceControl {
    /// Repository binding for a single application.
    pub fn for_repository(repository_url: &str, base_branch: &str) -> Self {
        Self {
            repository_url: Some(repository_url.to_string()),
            base_branch: Some(base_branch.to_string()),
            ..Default::default()
        }
    }
}

impl fmt::Debug for SourceControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceControl")
            .field("repository_url", &self.repository_url)
            .field("base_branch", &self.base_branch)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("provider", &self.provider)
            .field(
                "source_control_evaluations_enabled",
                &self.source_control_evaluations_enabled,
            )
            .finish_non_exhaustive()
    }
}

/// Request body for a source control policy evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceControlEvaluationRequest {
    pub branch_name: String,
    pub stage_id: String,
}
