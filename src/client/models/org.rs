//! Organization models

use serde::{Deserialize, Serialize};

/// Organization resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Server-assigned organization ID
    pub id: String,

    /// Organization name
    pub name: String,

    /// Parent organization ID (absent for the root organization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_organization_id: Option<String>,
}

impl Organization {
    /// Whether this organization sits directly under `parent_id`.
    pub fn is_child_of(&self, parent_id: &str) -> bool {
        self.parent_organization_id.as_deref() == Some(parent_id)
    }
}

/// Request body for creating an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub parent_organization_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_deserializes_root_without_parent() {
        let org: Organization =
            serde_json::from_str(r#"{"id":"ROOT_ORGANIZATION_ID","name":"Root Organization","tags":[]}"#)
                .unwrap();

        assert_eq!(org.id, "ROOT_ORGANIZATION_ID");
        assert!(org.parent_organization_id.is_none());
        assert!(!org.is_child_of("anything"));
    }

    #[test]
    fn test_create_request_uses_camel_case() {
        let request = CreateOrganizationRequest {
            name: "Org-1".to_string(),
            parent_organization_id: "root".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["parentOrganizationId"], "root");
        assert_eq!(json["name"], "Org-1");
    }
}
