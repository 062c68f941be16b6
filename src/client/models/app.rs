//! Application models

use serde::{Deserialize, Serialize};

/// Application resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Server-assigned internal ID
    pub id: String,

    /// Public ID (user-facing slug, unique per server)
    pub public_id: String,

    /// Application name
    pub name: String,

    /// Owning organization ID
    pub organization_id: String,
}

/// Request body for creating an application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub public_id: String,
    pub name: String,
    pub organization_id: String,
}
