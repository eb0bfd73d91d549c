//! Raw permission document as it appears on disk.
//!
//! These types mirror the JSON layout one-to-one and carry no invariants.
//! [`crate::validation::validate_document`] turns a document into a
//! [`crate::PermissionConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The top-level permission document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDocument {
    /// Role name -> role definition.
    pub roles: BTreeMap<String, RoleEntry>,

    /// Resource name -> operation name -> rule.
    ///
    /// Operation keys are kept as strings so that unknown verbs surface as
    /// a validation error rather than a parse error.
    pub permissions: BTreeMap<String, BTreeMap<String, RuleEntry>>,

    /// Role name -> resource name -> policy identifier (or null).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub row_level_security: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

/// A role definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub priority: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single (resource, operation) rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEntry {
    #[serde(alias = "minPriority")]
    pub minimum_priority: u32,

    /// Optional role name, cross-checked against `minimum_priority`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PermissionDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Parse a document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Add a role.
    pub fn with_role(mut self, name: impl Into<String>, priority: u32) -> Self {
        self.roles.insert(
            name.into(),
            RoleEntry {
                priority,
                description: None,
            },
        );
        self
    }

    /// Add a rule for one operation of a resource.
    pub fn with_rule(
        mut self,
        resource: impl Into<String>,
        operation: impl Into<String>,
        minimum_priority: u32,
    ) -> Self {
        self.permissions.entry(resource.into()).or_default().insert(
            operation.into(),
            RuleEntry {
                minimum_priority,
                minimum_role: None,
                description: None,
            },
        );
        self
    }

    /// Add rules for all four operations of a resource, in
    /// create/read/update/delete order.
    pub fn with_resource(self, resource: impl Into<String>, priorities: [u32; 4]) -> Self {
        let resource = resource.into();
        let [create, read, update, delete] = priorities;
        self.with_rule(resource.clone(), "create", create)
            .with_rule(resource.clone(), "read", read)
            .with_rule(resource.clone(), "update", update)
            .with_rule(resource, "delete", delete)
    }

    /// Add a row-level security entry.
    pub fn with_rls(
        mut self,
        role: impl Into<String>,
        resource: impl Into<String>,
        policy: Option<&str>,
    ) -> Self {
        self.row_level_security
            .entry(role.into())
            .or_default()
            .insert(resource.into(), policy.map(String::from));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let json = r#"{
            "roles": { "admin": { "priority": 2 }, "viewer": { "priority": 1 } },
            "permissions": {
                "reports": {
                    "create": { "minimumPriority": 2 },
                    "read": { "minPriority": 1, "minimumRole": "viewer" },
                    "update": { "minimumPriority": 2 },
                    "delete": { "minimumPriority": 2, "description": "Delete reports" }
                }
            }
        }"#;

        let doc = PermissionDocument::from_json_str(json).unwrap();
        assert_eq!(doc.roles.len(), 2);
        assert_eq!(doc.roles["admin"].priority, 2);
        assert!(doc.row_level_security.is_empty());

        let read = &doc.permissions["reports"]["read"];
        assert_eq!(read.minimum_priority, 1);
        assert_eq!(read.minimum_role.as_deref(), Some("viewer"));
    }

    #[test]
    fn test_parse_rls_null_entries() {
        let json = r#"{
            "roles": { "admin": { "priority": 1 } },
            "permissions": {},
            "rowLevelSecurity": { "admin": { "reports": null, "jobs": "own_jobs" } }
        }"#;

        let doc = PermissionDocument::from_json_str(json).unwrap();
        let admin = &doc.row_level_security["admin"];
        assert_eq!(admin["reports"], None);
        assert_eq!(admin["jobs"].as_deref(), Some("own_jobs"));
    }

    #[test]
    fn test_negative_priority_fails_to_parse() {
        let json = r#"{ "roles": { "admin": { "priority": -1 } }, "permissions": {} }"#;
        assert!(PermissionDocument::from_json_str(json).is_err());
    }

    #[test]
    fn test_builder_matches_parsed() {
        let built = PermissionDocument::default()
            .with_role("admin", 2)
            .with_resource("reports", [2, 1, 2, 2]);

        let json = built.to_json_pretty().unwrap();
        let parsed = PermissionDocument::from_json_str(&json).unwrap();
        assert_eq!(built, parsed);
        assert_eq!(parsed.permissions["reports"].len(), 4);
    }
}
