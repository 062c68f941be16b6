//! Record of what an import run did to each node

use std::fmt;

use serde::Serialize;
use tabled::Tabled;

use crate::client::OwnerType;

/// Whether the target entity was created or found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Created,
    Reused,
}

/// What happened to the node's source control configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScmOutcome {
    /// Added to a newly created entity
    Configured,
    /// Replaced on an existing entity
    Updated,
    /// Branch or repository URL failed a safety check
    Skipped,
    /// Nothing to attach (sub-organizations, or refresh disabled)
    None,
}

/// Outcome of the evaluation triggered after configuring a new application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    Triggered,
    Failed,
    NotRequested,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resolution::Created => "created",
            Resolution::Reused => "reused",
        })
    }
}

impl fmt::Display for ScmOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScmOutcome::Configured => "configured",
            ScmOutcome::Updated => "updated",
            ScmOutcome::Skipped => "skipped",
            ScmOutcome::None => "-",
        })
    }
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanOutcome::Triggered => "triggered",
            ScanOutcome::Failed => "failed",
            ScanOutcome::NotRequested => "-",
        })
    }
}

/// One reconciled organization or application
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub kind: OwnerType,
    pub source_name: String,
    pub target_name: String,
    pub target_id: String,
    pub resolution: Resolution,
    pub scm: ScmOutcome,
    pub scan: ScanOutcome,
}

/// Everything an import run did, in traversal order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub organizations_created: usize,
    pub organizations_reused: usize,
    pub applications_created: usize,
    pub applications_reused: usize,
    pub scm_skipped: usize,
    pub scans_failed: usize,
    pub records: Vec<ImportRecord>,
}

impl ImportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: ImportRecord) {
        match (record.kind, record.resolution) {
            (OwnerType::Organization, Resolution::Created) => self.organizations_created += 1,
            (OwnerType::Organization, Resolution::Reused) => self.organizations_reused += 1,
            (OwnerType::Application, Resolution::Created) => self.applications_created += 1,
            (OwnerType::Application, Resolution::Reused) => self.applications_reused += 1,
        }
        if record.scm == ScmOutcome::Skipped {
            self.scm_skipped += 1;
        }
        if record.scan == ScanOutcome::Failed {
            self.scans_failed += 1;
        }
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One-line totals for the end of a run.
    pub fn totals_line(&self) -> String {
        format!(
            "Organizations: {} created, {} reused. Applications: {} created, {} reused.",
            self.organizations_created,
            self.organizations_reused,
            self.applications_created,
            self.applications_reused
        )
    }
}

/// Table row for an [`ImportRecord`]
#[derive(Debug, Clone, Tabled)]
pub struct ImportRow {
    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "SOURCE")]
    pub source_name: String,

    #[tabled(rename = "TARGET")]
    pub target_name: String,

    #[tabled(rename = "ID")]
    pub target_id: String,

    #[tabled(rename = "RESULT")]
    pub resolution: String,

    #[tabled(rename = "SCM")]
    pub scm: String,

    #[tabled(rename = "SCAN")]
    pub scan: String,
}

impl From<&ImportRecord> for ImportRow {
    fn from(record: &ImportRecord) -> Self {
        Self {
            kind: record.kind.to_string(),
            source_name: record.source_name.clone(),
            target_name: record.target_name.clone(),
            target_id: record.target_id.clone(),
            resolution: record.resolution.to_string(),
            scm: record.scm.to_string(),
            scan: record.scan.to_string(),
        }
    }
}
