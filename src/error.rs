//! Error types for the SCM onboarder

use std::time::Duration;
use thiserror::Error;

use crate::client::models::OwnerType;

/// Result type alias for onboarder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scm(#[from] ScmError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Sonatype Lifecycle API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check the Sonatype Lifecycle username and password.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to Sonatype Lifecycle".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Source-control provider errors
#[derive(Debug, Error)]
pub enum ScmError {
    #[error("Source control authentication failed. Check your personal access token.")]
    Unauthorized,

    #[error("Source control request failed: {0}")]
    Request(String),

    #[error("Invalid source control response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ScmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScmError::Request("Request timed out".to_string())
        } else {
            ScmError::Request(err.to_string())
        }
    }
}

/// Configuration and credential errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(
        "No username has been supplied either via argument, environment variable or prompt. Cannot continue."
    )]
    MissingUsername,

    #[error(
        "No password has been supplied either via argument, environment variable or prompt. Cannot continue."
    )]
    MissingPassword,

    #[error("URL to Sonatype Lifecycle must be supplied")]
    MissingUrl,

    #[error("No source control access token has been supplied. Cannot continue.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Reconciliation failures that abort an import run
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to load existing entities from Sonatype Lifecycle: {0}")]
    CacheLoad(#[source] Box<Error>),

    #[error("Could not find requested Organization '{0}'")]
    TargetNotFound(String),

    #[error("Organization name '{name}' is ambiguous: {count} organizations match")]
    TargetAmbiguous { name: String, count: usize },

    #[error("Could not find a free {kind} name for '{candidate}' after {attempts} attempts")]
    CollisionExhausted {
        kind: OwnerType,
        candidate: String,
        attempts: usize,
    },

    #[error("Failed to create {kind} '{name}' after {attempts} attempts: {source}")]
    CreateFailed {
        kind: OwnerType,
        name: String,
        attempts: usize,
        #[source]
        source: Box<Error>,
    },
}
