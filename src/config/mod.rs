//! Optional configuration file for the onboarder
//!
//! Values here sit between environment variables and interactive prompts in
//! the credential precedence order.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::lifecycle::DEFAULT_REQUESTS_PER_SECOND;
use crate::error::{ConfigError, Result};
use crate::reconcile::context::DEFAULT_MAX_CREATE_ATTEMPTS;
use crate::sanitize::WhitespacePolicy;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Sonatype Lifecycle connection
    #[serde(default)]
    pub lifecycle: LifecycleSettings,

    /// Organization to import into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_organization: Option<String>,

    /// Azure DevOps connection
    #[serde(default)]
    pub azure: AzureSettings,

    #[serde(default)]
    pub naming: NamingSettings,

    /// Request rate limit for Sonatype Lifecycle
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Create attempts per organization or application before giving up
    #[serde(default = "default_max_create_attempts")]
    pub max_create_attempts: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecycleSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzureSettings {
    /// Personal access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pat: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamingSettings {
    /// Replace single spaces in names with `-`
    #[serde(default)]
    pub hyphenate_spaces: bool,
}

fn default_requests_per_second() -> u32 {
    DEFAULT_REQUESTS_PER_SECOND
}

fn default_max_create_attempts() -> usize {
    DEFAULT_MAX_CREATE_ATTEMPTS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleSettings::default(),
            target_organization: None,
            azure: AzureSettings::default(),
            naming: NamingSettings::default(),
            requests_per_second: default_requests_per_second(),
            max_create_attempts: default_max_create_attempts(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".scm-onboarder").join("config.yaml"))
    }

    /// Load from an explicit path, or from the default path when none is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.requests_per_second == 0 {
            return Err(
                ConfigError::Invalid("requests_per_second must be at least 1".to_string()).into(),
            );
        }
        if self.max_create_attempts == 0 {
            return Err(
                ConfigError::Invalid("max_create_attempts must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }

    pub fn whitespace_policy(&self) -> WhitespacePolicy {
        if self.naming.hyphenate_spaces {
            WhitespacePolicy::Hyphenate
        } else {
            WhitespacePolicy::Preserve
        }
    }
}
