//! Settings resolution for the import command
//!
//! Every value is taken from the first source that has a non-blank one:
//! command-line flag, environment variable (both via clap), config file,
//! then an interactive prompt for credentials.

use log::debug;

use super::ImportArgs;
use super::prompt::Prompter;
use crate::client::lifecycle::DEFAULT_URL;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::sanitize::WhitespacePolicy;
use crate::scm::ScmKind;

/// Organization imported into when none is named
pub const DEFAULT_TARGET_ORGANIZATION: &str = "Root Organization";

/// Fully resolved settings for one import run
#[derive(Clone)]
pub struct ImportSettings {
    pub url: String,
    pub username: String,
    pub password: String,
    pub scm: ScmKind,
    pub scm_token: String,
    pub target_organization: String,
    pub whitespace: WhitespacePolicy,
    pub refresh_existing_scm: bool,
    pub requests_per_second: u32,
    pub max_create_attempts: usize,
    pub azure_profile_host: Option<String>,
    pub azure_api_host: Option<String>,
}

impl std::fmt::Debug for ImportSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("scm", &self.scm)
            .field("scm_token", &"<redacted>")
            .field("target_organization", &self.target_organization)
            .field("whitespace", &self.whitespace)
            .field("refresh_existing_scm", &self.refresh_existing_scm)
            .field("requests_per_second", &self.requests_per_second)
            .field("max_create_attempts", &self.max_create_attempts)
            .finish()
    }
}

/// First candidate that is not blank, trimmed.
fn first_non_blank(candidates: &[Option<&str>]) -> Option<String> {
    first_non_blank_raw(candidates).map(|v| v.trim().to_string())
}

/// First candidate that is not blank, exactly as given. Used for secrets,
/// where surrounding whitespace is part of the value.
fn first_non_blank_raw(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ImportSettings {
    pub fn resolve(args: &ImportArgs, config: &Config, prompter: &dyn Prompter) -> Result<Self> {
        if args.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ConfigError::MissingUrl.into());
        }
        let url = first_non_blank(&[args.url.as_deref(), config.lifecycle.url.as_deref()])
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        let username = match first_non_blank(&[
            args.username.as_deref(),
            config.lifecycle.username.as_deref(),
        ]) {
            Some(v) => v,
            None => non_blank(prompter.input("Sonatype Lifecycle username")?)
                .map(|v| v.trim().to_string())
                .ok_or(ConfigError::MissingUsername)?,
        };

        let password = match first_non_blank_raw(&[
            args.password.as_deref(),
            config.lifecycle.password.as_deref(),
        ]) {
            Some(v) => v,
            None => non_blank(prompter.secret("Sonatype Lifecycle password")?)
                .ok_or(ConfigError::MissingPassword)?,
        };

        let scm_token = match args.scm {
            ScmKind::Azure => {
                match first_non_blank_raw(&[args.azure_pat.as_deref(), config.azure.pat.as_deref()])
                {
                    Some(v) => v,
                    None => {
                        let pat = prompter.secret("Enter your Azure DevOps PAT")?;
                        debug!("Read Azure DevOps PAT from prompt");
                        non_blank(pat).ok_or(ConfigError::MissingToken)?
                    }
                }
            }
        };

        let target_organization = first_non_blank(&[
            args.org_name.as_deref(),
            config.target_organization.as_deref(),
        ])
        .unwrap_or_else(|| DEFAULT_TARGET_ORGANIZATION.to_string());

        let whitespace = if args.hyphenate_spaces {
            WhitespacePolicy::Hyphenate
        } else {
            config.whitespace_policy()
        };

        Ok(Self {
            url,
            username,
            password,
            scm: args.scm,
            scm_token,
            target_organization,
            whitespace,
            refresh_existing_scm: !args.no_scm_refresh,
            requests_per_second: config.requests_per_second.max(1),
            max_create_attempts: config.max_create_attempts,
            azure_profile_host: first_non_blank(&[
                args.azure_profile_host.as_deref(),
                config.azure.profile_host.as_deref(),
            ]),
            azure_api_host: first_non_blank(&[
                args.azure_api_host.as_deref(),
                config.azure.api_host.as_deref(),
            ]),
        })
    }
}
