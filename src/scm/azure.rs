//! Azure DevOps discovery
//!
//! Maps Azure DevOps accounts to top-level organizations, projects to
//! sub-organizations and Git repositories to applications.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ScmConfiguration, ScmKind, ScmProvider};
use crate::error::{Result, ScmError};
use crate::hierarchy::{Application, HierarchyRoot, Organization};

/// Profile and accounts API host
pub const DEFAULT_PROFILE_HOST: &str = "https://app.vssps.visualstudio.com";

/// Core and Git API host
pub const DEFAULT_API_HOST: &str = "https://dev.azure.com";

const API_VERSION: &str = "7.1";
const CONTINUATION_HEADER: &str = "x-ms-continuationtoken";
const BRANCH_REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Deserialize)]
struct Profile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    account_name: String,
}

#[derive(Debug, Deserialize)]
struct Project {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repository {
    name: String,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    remote_url: Option<String>,
}

impl From<Repository> for Application {
    fn from(repo: Repository) -> Self {
        let branch = repo
            .default_branch
            .map(|b| b.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(&b).to_string());
        Application {
            name: repo.name,
            default_branch: branch,
            repository_url: repo.remote_url.unwrap_or_default(),
        }
    }
}

/// Azure DevOps provider authenticated with a personal access token
pub struct AzureDevOpsProvider {
    http: HttpClient,
    pat: String,
    profile_host: String,
    api_host: String,
}

impl AzureDevOpsProvider {
    /// Create a provider. Hosts default to the public Azure DevOps service.
    pub fn with_hosts(pat: &str, profile_host: Option<&str>, api_host: Option<&str>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScmError::Request(e.to_string()))?;

        Ok(Self {
            http,
            pat: pat.to_string(),
            profile_host: profile_host
                .unwrap_or(DEFAULT_PROFILE_HOST)
                .trim_end_matches('/')
                .to_string(),
            api_host: api_host
                .unwrap_or(DEFAULT_API_HOST)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .query(&[("api-version", API_VERSION)])
            .query(query)
            .basic_auth("", Some(&self.pat))
            .send()
            .await
            .map_err(ScmError::from)?;

        match response.status() {
            // An invalid PAT is answered with a sign-in page and 203.
            StatusCode::UNAUTHORIZED | StatusCode::NON_AUTHORITATIVE_INFORMATION => {
                Err(ScmError::Unauthorized.into())
            }
            status if status.is_success() => Ok(response),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ScmError::Request(format!("{} from {}: {}", status, url, body)).into())
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self.get(url, query).await?;
        let data = response
            .json::<T>()
            .await
            .map_err(|e| ScmError::InvalidResponse(format!("{}: {}", url, e)))?;
        Ok(data)
    }

    async fn profile(&self) -> Result<Profile> {
        let url = format!("{}/_apis/profile/profiles/me", self.profile_host);
        let profile: Profile = self.get_json(&url, &[]).await?;
        debug!("Successfully connected to Azure DevOps (profile ID {})", profile.id);
        Ok(profile)
    }

    async fn accounts(&self, member_id: &str) -> Result<Vec<Account>> {
        let url = format!("{}/_apis/accounts", self.profile_host);
        let response: ListResponse<Account> =
            self.get_json(&url, &[("memberId", member_id)]).await?;
        Ok(response.value)
    }

    /// All projects of an account, following continuation tokens.
    async fn projects(&self, account: &Account) -> Result<Vec<Project>> {
        let url = format!("{}/{}/_apis/projects", self.api_host, account.account_name);
        let mut projects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let query: Vec<(&str, &str)> = match continuation.as_deref() {
                Some(token) => vec![("continuationToken", token)],
                None => Vec::new(),
            };
            let response = self.get(&url, &query).await?;
            let next = response
                .headers()
                .get(CONTINUATION_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            let page: ListResponse<Project> = response
                .json()
                .await
                .map_err(|e| ScmError::InvalidResponse(format!("{}: {}", url, e)))?;
            projects.extend(page.value);
            debug!(
                "Found {} Projects in Account {}",
                projects.len(),
                account.account_name
            );

            match next {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(projects)
    }

    async fn repositories(&self, account: &Account, project: &Project) -> Result<Vec<Repository>> {
        debug!("Getting Repositories for Project {}", project.id);
        let url = format!(
            "{}/{}/{}/_apis/git/repositories",
            self.api_host, account.account_name, project.id
        );
        let response: ListResponse<Repository> = self.get_json(&url, &[]).await?;
        Ok(response.value)
    }
}

#[async_trait]
impl ScmProvider for AzureDevOpsProvider {
    fn kind(&self) -> ScmKind {
        ScmKind::Azure
    }

    async fn discover_hierarchy(&self) -> Result<HierarchyRoot> {
        debug!("Azure DevOps - Loading Organisations (from Accounts)");
        let profile = self.profile().await?;
        let accounts = self.accounts(&profile.id).await?;

        let mut organizations = Vec::with_capacity(accounts.len());
        for account in &accounts {
            let mut sub_organizations = Vec::new();
            for project in self.projects(account).await? {
                let applications = self
                    .repositories(account, &project)
                    .await?
                    .into_iter()
                    .map(Application::from)
                    .collect();
                sub_organizations.push(
                    Organization::new(project.name, ScmKind::Azure)
                        .with_applications(applications),
                );
            }

            organizations.push(
                Organization::new(account.account_name.clone(), ScmKind::Azure)
                    .with_sub_organizations(sub_organizations),
            );
        }

        Ok(HierarchyRoot::new(organizations))
    }

    fn scm_config(&self) -> ScmConfiguration {
        ScmConfiguration {
            provider: ScmKind::Azure,
            username: None,
            token: self.pat.clone(),
        }
    }
}
