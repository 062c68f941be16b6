//! Per-run settings shared by every reconciliation step

use crate::sanitize::Sanitizer;

/// Attempts allowed per create before giving up
pub const DEFAULT_MAX_CREATE_ATTEMPTS: usize = 3;

/// Stage used for the evaluation triggered after a new application is configured
pub const DEFAULT_EVALUATION_STAGE: &str = "source";

/// Settings built once per run and passed by reference to the engine
#[derive(Debug, Clone)]
pub struct RunContext {
    pub sanitizer: Sanitizer,
    pub max_create_attempts: usize,
    /// Update SCM configuration on organizations that already exist
    pub refresh_existing_scm: bool,
    pub evaluation_stage: String,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            sanitizer: Sanitizer::default(),
            max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
            refresh_existing_scm: true,
            evaluation_stage: DEFAULT_EVALUATION_STAGE.to_string(),
        }
    }
}

impl RunContext {
    pub fn new(sanitizer: Sanitizer) -> Self {
        Self {
            sanitizer,
            ..Default::default()
        }
    }

    pub fn with_refresh_existing_scm(mut self, refresh: bool) -> Self {
        self.refresh_existing_scm = refresh;
        self
    }

    pub fn with_max_create_attempts(mut self, attempts: usize) -> Self {
        self.max_create_attempts = attempts.max(1);
        self
    }
}
