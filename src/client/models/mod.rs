//! Sonatype Lifecycle API data models
//!
//! Models are organized by resource type for easy discovery.

mod app;
mod org;
mod source_control;

// Re-export all models for convenient access
pub use app::{Application, CreateApplicationRequest};
pub use org::{CreateOrganizationRequest, Organization};
pub use source_control::{OwnerType, SourceControl, SourceControlEvaluationRequest};
